//! Command-line interface for single-block AES-256.

#![forbid(unsafe_code)]

mod logger;

use aes_core::{
    decrypt, encrypt, expand_round_keys, hamming_distance, Aes256, Aes256Key, Block, BLOCK_SIZE,
    KEY_SIZE,
};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, error, info, metadata::LevelFilter};

/// AES-256 single-block CLI.
#[derive(Parser)]
#[command(name = "aes256", version, author, about = "AES-256 single-block CLI")]
struct Cli {
    /// Default log level when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt one 16-byte block.
    Enc {
        /// AES-256 key as 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Decrypt one 16-byte block.
    Dec {
        /// AES-256 key as 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Ciphertext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Print the 15 round keys derived from a key.
    Expand {
        /// AES-256 key as 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
    },
    /// Run known-answer vectors and random round trips.
    Check {
        /// Number of random round trips.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Encrypt and decrypt a random block under a random key.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// (key, plaintext, ciphertext) from FIPS-197 C.3 and SP 800-38A F.1.5.
const KNOWN_ANSWERS: [(&str, &str, &str); 3] = [
    (
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        "00112233445566778899aabbccddeeff",
        "8ea2b7ca516745bfeafc49904b496089",
    ),
    (
        "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4",
        "6bc1bee22e409f96e93d7e117393172a",
        "f3eed1bdb5d2a03c064b5a7e3db181f8",
    ),
    (
        "0000000000000000000000000000000000000000000000000000000000000000",
        "00000000000000000000000000000000",
        "dc95c078a2408989ad48a21492842087",
    ),
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.log_level);
    let result = match cli.command {
        Commands::Enc { key_hex, block_hex } => cmd_enc(&key_hex, &block_hex),
        Commands::Dec { key_hex, block_hex } => cmd_dec(&key_hex, &block_hex),
        Commands::Expand { key_hex } => cmd_expand(&key_hex),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    };
    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}

fn cmd_enc(key_hex: &str, block_hex: &str) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let block = parse_block_hex(block_hex)?;
    debug!("encrypting one block");
    println!("{}", hex::encode(encrypt(&block, &key.0)));
    Ok(())
}

fn cmd_dec(key_hex: &str, block_hex: &str) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let block = parse_block_hex(block_hex)?;
    debug!("decrypting one block");
    println!("{}", hex::encode(decrypt(&block, &key.0)));
    Ok(())
}

fn cmd_expand(key_hex: &str) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let round_keys = expand_round_keys(&key);
    for round in 0..round_keys.len() {
        println!("round {round:>2}: {}", hex::encode(round_keys.get(round)));
    }
    Ok(())
}

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    run_known_answers()?;
    info!(vectors = KNOWN_ANSWERS.len(), "known-answer vectors passed");

    let mut rng = seeded_rng(seed);
    let mut total_flips = 0u64;
    for sample in 0..samples {
        let mut key_bytes = [0u8; KEY_SIZE];
        let mut block = [0u8; BLOCK_SIZE];
        rng.fill_bytes(&mut key_bytes);
        rng.fill_bytes(&mut block);
        let cipher = Aes256::new(&Aes256Key::from(key_bytes));

        let ct = cipher.encrypt_block(&block);
        if cipher.decrypt_block(&ct) != block {
            bail!("round trip failed on sample {sample}");
        }
        if ct != encrypt(&block, &key_bytes) {
            bail!("cached and one-shot schedules disagree on sample {sample}");
        }

        let mut flipped = block;
        flipped[sample % BLOCK_SIZE] ^= 1u8 << (sample % 8);
        total_flips += u64::from(hamming_distance(&ct, &cipher.encrypt_block(&flipped)));
    }
    if samples > 0 {
        let average = total_flips as f64 / samples as f64;
        info!(samples, average_bit_flips = average, "random round trips passed");
        if !(32.0..=96.0).contains(&average) {
            bail!("average avalanche of {average:.1} bits is outside 32..=96");
        }
    }
    println!("ok");
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key_bytes = [0u8; KEY_SIZE];
    let mut block = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut key_bytes);
    rng.fill_bytes(&mut block);

    let ciphertext = encrypt(&block, &key_bytes);
    let decrypted = decrypt(&ciphertext, &key_bytes);

    println!("demo key: {}", hex::encode(key_bytes));
    println!("plaintext: {}", hex::encode(block));
    println!("ciphertext: {}", hex::encode(ciphertext));
    println!("decrypted: {}", hex::encode(decrypted));
    if decrypted != block {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn run_known_answers() -> Result<()> {
    for (idx, (key_hex, plain_hex, cipher_hex)) in KNOWN_ANSWERS.iter().enumerate() {
        let key = parse_key_hex(key_hex)?;
        let plain = parse_block_hex(plain_hex)?;
        let expected = parse_block_hex(cipher_hex)?;
        if encrypt(&plain, &key.0) != expected {
            bail!("known-answer vector {idx}: encryption mismatch");
        }
        if decrypt(&expected, &key.0) != plain {
            bail!("known-answer vector {idx}: decryption mismatch");
        }
        debug!(vector = idx, "known-answer vector ok");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Aes256Key> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    Aes256Key::try_from(bytes.as_slice())
        .context("AES-256 key must be 32 bytes (64 hex characters)")
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode block hex")?;
    aes_core::block_from_slice(&bytes).context("block must be 16 bytes (32 hex characters)")
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
