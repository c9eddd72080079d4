// Pronounceable nicknames derived from gene values.
//
// The genome is rendered as comma-separated decimal values, hashed with djb2
// (wrapping 32-bit arithmetic), and the hash is spent as a mixed-radix number
// over a syllable table. Two to four syllables, capitalized, at most ten
// characters. Only used for display; nothing depends on uniqueness.

const SYLLABLES: [&str; 84] = [
    "ba", "be", "bi", "bo", "bu", "da", "de", "di", "do", "du", "fa", "fe", "fi", "fo", "fu", "ga",
    "ge", "gi", "go", "gu", "ka", "ke", "ki", "ko", "ku", "la", "le", "li", "lo", "lu", "ma", "me",
    "mi", "mo", "mu", "na", "ne", "ni", "no", "nu", "pa", "pe", "pi", "po", "pu", "ra", "re", "ri",
    "ro", "ru", "sa", "se", "si", "so", "su", "ta", "te", "ti", "to", "tu", "va", "ve", "vi", "vo",
    "vu", "za", "ze", "zi", "zo", "zu", "jo", "ju", "ji", "je", "ja", "xo", "xa", "xi", "xe", "xu",
    "qu", "qi", "que", "qui",
];

const MAX_NICKNAME_LEN: usize = 10;

pub(crate) fn nickname(genes: &[u8]) -> String {
    let rendered = genes
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let hash = djb2(&rendered);

    let syllable_count = 2 + (hash % 3) as usize;
    let mut name = String::new();
    let mut h = hash as usize;
    for _ in 0..syllable_count {
        name.push_str(SYLLABLES[h % SYLLABLES.len()]);
        h /= SYLLABLES.len();
    }

    let mut chars = name.chars();
    let mut out: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    out.truncate(MAX_NICKNAME_LEN);
    out
}

fn djb2(s: &str) -> u32 {
    s.bytes().fold(5381u32, |hash, c| {
        (hash << 5).wrapping_add(hash).wrapping_add(c as u32)
    })
}
