// Gene Pool utterance composer: CLI entry point.
//
// Composes the utterance for one genome, prints the voice and event list,
// and optionally writes it as a MIDI file.
//
// Usage:
//   cargo run -p genepool_music --bin compose -- [--preset NAME | --genome FILE | --seed N]
//     [--config FILE] [--midi OUT.mid] [--json]
//
// Presets: darwin, wallace, mendel, turing, margulis, wilson, dawkins, dennett

use clap::Parser;
use genepool_genetics::{GeneMap, GeneSequence, Preset};
use genepool_music::midi::write_midi;
use genepool_music::{Composer, ComposerConfig, UtteranceEvent, UtteranceTiming};
use genepool_prng::PoolRng;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "compose")]
#[command(version)]
#[command(about = "Compose the lifelong utterance of a Gene Pool genome")]
struct Cli {
    /// Named preset genome
    #[arg(long, conflicts_with_all = ["genome", "seed"])]
    preset: Option<String>,

    /// JSON file holding 256 gene values
    #[arg(long, conflicts_with = "seed")]
    genome: Option<PathBuf>,

    /// Seed for a random genome (default when no genome source is given)
    #[arg(long)]
    seed: Option<u64>,

    /// Composer config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the utterance as a Standard MIDI File
    #[arg(long)]
    midi: Option<PathBuf>,

    /// Print the utterance as JSON instead of a listing
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("compose: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let genome = load_genome(cli)?;
    let config = match &cli.config {
        Some(path) => ComposerConfig::load(path)?,
        None => ComposerConfig::default(),
    };
    let map = GeneMap::canonical();
    let timing = UtteranceTiming::decode(&genome, map)?;
    let utterance =
        Composer::new(&config, map).compose(&genome, timing.period_ticks, timing.duration_ticks)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&utterance)?);
    } else {
        let voice = utterance.voice();
        let stats = utterance.stats();
        println!("=== {} ===", genome.nickname());
        println!(
            "Timing: every {} ticks, {} ticks long ({} ms)",
            timing.period_ticks, timing.duration_ticks, voice.target_ms
        );
        println!(
            "Voice: centre {} + {} in {} (rotated {}), {:?}",
            voice.tonal_centre,
            voice.octave_shift,
            voice.scale.name(),
            voice.rotation,
            voice.note_length_style
        );
        println!(
            "Modulation: {:.0}% chance, strength {}; {} matrix mutations",
            voice.modulation_chance * 100.0,
            voice.modulation_strength,
            voice.matrix_mutations
        );
        println!(
            "Stats: {} notes, {} distinct pitches, range {:?}..{:?}, {} modulations",
            stats.note_count,
            stats.distinct_pitches,
            stats.lowest_pitch,
            stats.highest_pitch,
            stats.modulation_count
        );
        println!();
        for event in utterance.events() {
            match *event {
                UtteranceEvent::Note {
                    offset_ms,
                    pitch,
                    velocity,
                    duration_ms,
                } => println!("{offset_ms:>6} ms  note {pitch:>3} vel {velocity:>3} for {duration_ms} ms"),
                UtteranceEvent::Modulation {
                    offset_ms,
                    controller,
                    value,
                } => println!("{offset_ms:>6} ms  cc{controller} = {value}"),
                UtteranceEvent::Done { offset_ms } => println!("{offset_ms:>6} ms  done"),
            }
        }
    }

    if let Some(path) = &cli.midi {
        write_midi(&utterance, path)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn load_genome(cli: &Cli) -> Result<GeneSequence, Box<dyn std::error::Error>> {
    if let Some(name) = &cli.preset {
        return Preset::from_name(name)
            .map(Preset::genome)
            .ok_or_else(|| format!("unknown preset '{name}'").into());
    }
    if let Some(path) = &cli.genome {
        return Ok(GeneSequence::load(path)?);
    }
    let seed = cli.seed.unwrap_or(0);
    Ok(GeneSequence::random(&mut PoolRng::new(seed)))
}
