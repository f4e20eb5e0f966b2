//! spellbloom - spell check words against a bloom filter of a dictionary.
//!
//! 1. Build a bitmap from a dictionary and save it:
//!
//!        spellbloom build -i /usr/share/dict/words -o bitmap.bin -n 2
//!
//! 2. Spell check a word:
//!
//!        spellbloom check -i bitmap.bin -n 2 wrod
//!
//! 3. Measure the false positive rate with random words:
//!
//!        spellbloom accuracy -i bitmap.bin -c 2 -n 10000

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spellbloom::{expected_false_positive_rate, words, FilterBuilder, HashCount};
use tracing_subscriber::EnvFilter;

const DEFAULT_BITMAP: &str = "bitmap.bin";

#[derive(Parser)]
#[command(name = "spellbloom")]
#[command(about = "Spell check words using a bloom filter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a bitmap from a dictionary and save it
    Build {
        /// Dictionary file, one word per line
        #[arg(short, long, value_name = "FILE", default_value = words::DEFAULT_DICTIONARY)]
        input: PathBuf,

        /// File to save the bitmap to
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_BITMAP)]
        output: PathBuf,

        /// Number of hashes per word (1: md5, 2: +sha256, 3: +crc32)
        #[arg(short, long, default_value = "1", value_parser = parse_hash_count)]
        num: HashCount,

        /// Size of the bitmap in KiB
        #[arg(short, long, default_value_t = 64)]
        size: usize,
    },
    /// Spell check a word
    Check {
        /// Word to check
        word: String,

        /// Bitmap file to use
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_BITMAP)]
        input: PathBuf,

        /// Number of hashes per word. Must match the value used to build the
        /// bitmap
        #[arg(short, long, default_value = "1", value_parser = parse_hash_count)]
        num: HashCount,
    },
    /// Check random words to measure the false positive rate
    Accuracy {
        /// Bitmap file to use
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_BITMAP)]
        input: PathBuf,

        /// Dictionary the bitmap was built from
        #[arg(
            short = 'w',
            long = "words",
            value_name = "FILE",
            default_value = words::DEFAULT_DICTIONARY
        )]
        dictionary: PathBuf,

        /// Number of random words to generate
        #[arg(short, long, default_value_t = 1000)]
        num: usize,

        /// Number of hashes per word. Must match the value used to build the
        /// bitmap
        #[arg(short, long, default_value = "1", value_parser = parse_hash_count)]
        checksum: HashCount,
    },
}

fn parse_hash_count(s: &str) -> Result<HashCount> {
    let n: usize = s.parse().context("not a number")?;
    Ok(HashCount::new(n)?)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            num,
            size,
        } => {
            let size_bytes = size
                .checked_mul(1024)
                .context("bitmap size is too large")?;

            let dictionary = words::read_words(&input)?;
            let mut filter = FilterBuilder::with_size(size_bytes)?.build();
            filter.build(&dictionary, num);
            filter
                .save(&output)
                .with_context(|| format!("failed to save bitmap to {}", output.display()))?;

            println!(
                "Built bitmap of {} bytes from {} words ({:.1}% of bits set)",
                filter.byte_size(),
                dictionary.len(),
                filter.fill_ratio() * 100.0
            );
        }
        Commands::Check { word, input, num } => {
            let filter = FilterBuilder::from_file(&input)
                .context("failed to load bitmap")?
                .build();

            let result = if filter.check(&word, num) {
                "Correct"
            } else {
                "Wrong"
            };

            println!("Spell check using Bloom Filter:");
            println!("\tThe spelling of \"{}\" is {}", word, result);
        }
        Commands::Accuracy {
            input,
            dictionary,
            num,
            checksum,
        } => {
            let filter = FilterBuilder::from_file(&input)
                .context("failed to load bitmap")?
                .build();

            let ground_truth: HashSet<String> =
                words::read_words(&dictionary)?.into_iter().collect();
            let rate = filter.estimate_false_positive_rate(&ground_truth, num, checksum)?;

            println!("Bloom Filter test using {} random words:", num);
            println!("\tFalse positive rate: {}", rate);
            println!(
                "\tExpected rate for {} words: {:.6}",
                ground_truth.len(),
                expected_false_positive_rate(filter.num_bits(), ground_truth.len(), checksum)
            );
        }
    }

    Ok(())
}
