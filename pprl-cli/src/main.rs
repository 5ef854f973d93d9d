// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `pprl` command-line front end: JSON files in, JSON files out, exit
//! code 0 on success and a single-line diagnostic on stderr otherwise.

use std::{
	fs::File,
	io::{BufReader, BufWriter},
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{de::DeserializeOwned, Serialize};

use pprl_bitvec::BitVectorEntity;
use pprl_mask::{compute_stats, MaskConfig};
use pprl_match::MatchConfig;
use pprl_transform::{Entity, Tokenizer, TransformConfig};

#[derive(Parser)]
#[command(name = "pprl", version, about = "Privacy-preserving record linkage toolkit")]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Run the transform pipeline over a batch of entities.
	Transform {
		#[arg(long)]
		config: PathBuf,
		#[arg(long)]
		input: PathBuf,
		#[arg(long)]
		output: PathBuf,
	},
	/// Mask entities into bit-vector entities.
	Mask {
		#[arg(long)]
		config: PathBuf,
		#[arg(long)]
		input: PathBuf,
		#[arg(long)]
		output: PathBuf,
	},
	/// Match two masked collections against a similarity threshold.
	Match {
		#[arg(long)]
		config: PathBuf,
		#[arg(long)]
		domain: PathBuf,
		#[arg(long)]
		range: PathBuf,
		#[arg(long)]
		output: PathBuf,
	},
	/// Per-attribute token and entropy statistics for weight estimation.
	Stats {
		/// q-gram length used for counting.
		#[arg(long, default_value_t = 2)]
		q: usize,
		#[arg(long)]
		input: PathBuf,
		#[arg(long)]
		output: PathBuf,
	},
}

fn main() {
	env_logger::init();
	if let Err(e) = run(Cli::parse()) {
		eprintln!("pprl: {:#}", e);
		std::process::exit(1);
	}
}

fn run(cli: Cli) -> Result<()> {
	match cli.command {
		Command::Transform { config, input, output } => {
			let config: TransformConfig = read_json(&config)?;
			let entities: Vec<Entity> = read_json(&input)?;
			let transformed = pprl_transform::transform(&config, &entities)?;
			write_json(&output, &transformed)
		},
		Command::Mask { config, input, output } => {
			let config: MaskConfig = read_json(&config)?;
			let entities: Vec<Entity> = read_json(&input)?;
			let masked = pprl_mask::mask(&config, &entities)?;
			write_json(&output, &masked)
		},
		Command::Match { config, domain, range, output } => {
			let config: MatchConfig = read_json(&config)?;
			let domain: Vec<BitVectorEntity> = read_json(&domain)?;
			let range: Vec<BitVectorEntity> = read_json(&range)?;
			let pairs = pprl_match::find_matches(&config, &domain, &range);
			write_json(&output, &pairs)
		},
		Command::Stats { q, input, output } => {
			anyhow::ensure!(q > 0, "q must be positive");
			let entities: Vec<Entity> = read_json(&input)?;
			let stats = compute_stats(&entities, &Tokenizer::new(q));
			write_json(&output, &stats)
		},
	}
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
	let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
	serde_json::from_reader(BufReader::new(file))
		.with_context(|| format!("cannot parse {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
	let file =
		File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
	serde_json::to_writer_pretty(BufWriter::new(file), value)
		.with_context(|| format!("cannot write {}", path.display()))?;
	Ok(())
}
