// Gene Pool birth report: CLI entry point.
//
// Births one organism (or a batch) and prints its body plan and utterance
// summary. The parent genome comes from a preset, a JSON file, the Froggy
// template, or a random seed; `--mate` and `--clone` reproduce from it first.
//
// Usage:
//   cargo run -p genepool_embryo --bin birth -- [--preset NAME | --genome FILE | --froggy]
//     [--seed N] [--mate PRESET | --clone] [--batch N] [--config FILE] [--json]

use clap::Parser;
use genepool_embryo::{Birth, EmbryoConfig, birth_many};
use genepool_genetics::presets::froggy;
use genepool_genetics::{GeneMap, GeneSequence, Preset};
use genepool_prng::PoolRng;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "birth")]
#[command(version)]
#[command(about = "Grow a Gene Pool organism from its genome and report on it")]
struct Cli {
    /// Named preset genome
    #[arg(long, conflicts_with_all = ["genome", "froggy"])]
    preset: Option<String>,

    /// JSON file holding 256 gene values
    #[arg(long, conflicts_with = "froggy")]
    genome: Option<PathBuf>,

    /// Build the Froggy template genome
    #[arg(long)]
    froggy: bool,

    /// Seed for random genomes and reproduction
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Cross the parent with this preset
    #[arg(long, conflicts_with = "clonal")]
    mate: Option<String>,

    /// Clone the parent with mutation
    #[arg(long = "clone")]
    clonal: bool,

    /// Birth this many random genomes in parallel and print one line each
    #[arg(long, conflicts_with_all = ["preset", "genome", "froggy", "mate", "clonal"])]
    batch: Option<usize>,

    /// Embryo config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print births as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("birth: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => EmbryoConfig::load(path)?,
        None => EmbryoConfig::default(),
    };
    let map = GeneMap::canonical();
    let mut rng = PoolRng::new(cli.seed);

    if let Some(count) = cli.batch {
        let genomes = (0..count).map(|_| GeneSequence::random(&mut rng)).collect();
        let births = birth_many(genomes, &config, map)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&births)?);
        } else {
            for birth in &births {
                print_summary_line(birth);
            }
        }
        log::info!("born {} organisms", births.len());
        return Ok(());
    }

    let parent = load_genome(cli, map, &mut rng)?;
    let birth = if let Some(name) = &cli.mate {
        let mate = preset(name)?.genome();
        let birth = Birth::sexual(&parent, &mate, &config, map, &mut rng)?;
        log::info!(
            "crossed {} with {}: {} genes mutated",
            parent.nickname(),
            mate.nickname(),
            drift(&birth.genome, &parent, &mate)
        );
        birth
    } else if cli.clonal {
        let birth = Birth::clonal(&parent, &config, map, &mut rng)?;
        log::info!(
            "cloned {}: {} genes mutated",
            parent.nickname(),
            birth.genome.hamming_distance(&parent)
        );
        birth
    } else {
        Birth::from_genome(parent, &config, map)?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&birth)?);
    } else {
        print_report(&birth);
    }
    Ok(())
}

fn preset(name: &str) -> Result<Preset, Box<dyn std::error::Error>> {
    Preset::from_name(name).ok_or_else(|| format!("unknown preset '{name}'").into())
}

fn load_genome(
    cli: &Cli,
    map: &GeneMap,
    rng: &mut PoolRng,
) -> Result<GeneSequence, Box<dyn std::error::Error>> {
    if let Some(name) = &cli.preset {
        return Ok(preset(name)?.genome());
    }
    if let Some(path) = &cli.genome {
        return Ok(GeneSequence::load(path)?);
    }
    if cli.froggy {
        return Ok(froggy(map, rng)?);
    }
    Ok(GeneSequence::random(rng))
}

/// Genes in `child` matching neither parent, i.e. mutations.
fn drift(child: &GeneSequence, a: &GeneSequence, b: &GeneSequence) -> usize {
    child
        .genes()
        .iter()
        .zip(a.genes().iter().zip(b.genes().iter()))
        .filter(|&(c, (x, y))| c != x && c != y)
        .count()
}

fn print_summary_line(birth: &Birth) {
    let body = &birth.phenotype;
    let stats = birth.utterance.stats();
    println!(
        "{:<10} {:>2} parts {:>2} branches mass {:>7.1}  {:>2} notes {:>5} ms",
        birth.nickname,
        body.num_parts(),
        body.branch_count(),
        body.mass(),
        stats.note_count,
        birth.utterance.length_ms()
    );
}

fn print_report(birth: &Birth) {
    let body = &birth.phenotype;
    let timing = body.timing();
    println!("=== {} ===", birth.nickname);
    println!(
        "Body: {} parts, {} branch points, mass {:.1}, length {:.1}, frequency {:.3}",
        body.num_parts(),
        body.branch_count(),
        body.mass(),
        body.body_length(),
        body.frequency()
    );
    println!(
        "Food: prefers type {}, digests type {}",
        body.preferred_food_type(),
        body.digestible_food_type()
    );
    println!();
    println!(" idx cat parent child branch  angle  width length    amp  phase");
    for (index, part) in body.parts().iter().enumerate() {
        println!(
            "{index:>4} {:>3} {:>6} {:>5} {:>6} {:>6.1} {:>6.2} {:>6.2} {:>6.1} {:>6.2}",
            part.category,
            part.parent.map_or_else(|| "-".to_string(), |p| p.to_string()),
            part.child.map_or_else(|| "-".to_string(), |c| c.to_string()),
            if part.is_branch { "yes" } else { "" },
            part.angle,
            part.width,
            part.length,
            part.amp,
            part.phase
        );
    }
    println!();

    let voice = birth.utterance.voice();
    let stats = birth.utterance.stats();
    let style = format!("{:?}", voice.note_length_style).to_lowercase();
    println!(
        "Utterance: every {} ticks for {} ticks; {} in {} at centre {} + {}",
        timing.period_ticks,
        timing.duration_ticks,
        style,
        voice.scale.name(),
        voice.tonal_centre,
        voice.octave_shift
    );
    println!(
        "  {} notes, {} distinct pitches ({:?}..{:?}), {} modulations, {} ms",
        stats.note_count,
        stats.distinct_pitches,
        stats.lowest_pitch,
        stats.highest_pitch,
        stats.modulation_count,
        birth.utterance.length_ms()
    );
}
