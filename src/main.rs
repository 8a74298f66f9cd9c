use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fenwick_bits::{bit_index, tree, InfiniteBits};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fenwick-bits",
    about = "Explore infinite bit strings and the index arithmetic of Fenwick trees"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render integers as infinite bit strings.
    Show {
        /// Integers to render.
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
    },
    /// Apply a navigation primitive to an integer.
    Navigate {
        /// Primitive to apply.
        op: NavOp,
        /// Input value.
        #[arg(allow_negative_numbers = true)]
        value: i64,
        /// Tree depth for forward/backward, target bit for shift/unshift.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        depth: i64,
    },
    /// Print the Fenwick update and query paths of an index.
    Walk {
        /// Number of positions in the tree.
        len: usize,
        /// 1-based position to walk from.
        index: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum NavOp {
    Shift,
    Unshift,
    Forward,
    Backward,
    ActiveParent,
    PreviousSegment,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Show { values } => run_show(&values),
        Commands::Navigate { op, value, depth } => run_navigate(op, value, depth)?,
        Commands::Walk { len, index } => run_walk(len, index)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_show(values: &[i64]) {
    for &value in values {
        let bits = InfiniteBits::from_integer(value);
        let parity = if bits.is_odd() { "odd" } else { "even" };
        println!(
            "{}\t{}\tlsb={}\t{}",
            value,
            bits,
            bits.lowest_set_bit(),
            parity
        );
    }
}

fn run_navigate(op: NavOp, value: i64, depth: i64) -> Result<()> {
    let depth = bit_index(depth).context("invalid --depth")?;
    let input = InfiniteBits::from_integer(value);

    let output = match op {
        NavOp::Shift => tree::shift_toward(depth, &input),
        NavOp::Unshift => tree::unshift_from(depth, &input)?,
        NavOp::Forward => tree::forward_translate(depth, &input),
        NavOp::Backward => tree::backward_translate(depth, &input)?,
        NavOp::ActiveParent => tree::active_parent(&input)?,
        NavOp::PreviousSegment => tree::previous_segment(&input)?,
    };
    debug!(?op, depth, %input, %output, "navigated");

    println!("in \t{}\t{}", value, input);
    println!("out\t{}\t{}", integer_or_wide(&output), output);
    Ok(())
}

fn run_walk(len: usize, index: usize) -> Result<()> {
    let (up, down) = bit_paths(len, index)?;

    let up_ints = up.iter().map(|b| b.to_integer()).collect::<Result<Vec<_>, _>>()?;
    let down_ints = down.iter().map(|b| b.to_integer()).collect::<Result<Vec<_>, _>>()?;
    let expected_up: Vec<i64> = tree::update_path(index, len).map(|i| i as i64).collect();
    let expected_down: Vec<i64> = tree::query_path(index, len).map(|i| i as i64).collect();
    if up_ints != expected_up || down_ints != expected_down {
        bail!(
            "bit-derived paths {:?}/{:?} disagree with the Fenwick tree {:?}/{:?}",
            up_ints,
            down_ints,
            expected_up,
            expected_down
        );
    }

    println!("update path (i + lsb i):");
    for (bits, value) in up.iter().zip(&up_ints) {
        println!("  {:>6}\t{}", value, bits);
    }
    println!("query path (i - lsb i):");
    for (bits, value) in down.iter().zip(&down_ints) {
        println!("  {:>6}\t{}", value, bits);
    }
    Ok(())
}

/// Update and query paths of `index`, stepped on bit strings.
fn bit_paths(len: usize, index: usize) -> Result<(Vec<InfiniteBits>, Vec<InfiniteBits>)> {
    if index == 0 || index > len {
        bail!("index {} outside 1..={}", index, len);
    }
    let limit = i64::try_from(len).context("length does not fit in i64")?;
    let start = InfiniteBits::from_integer(i64::try_from(index)?);

    let mut up = vec![start.clone()];
    loop {
        let next = tree::add_lowest_set_bit(up.last().unwrap_or(&start))?;
        // A step past i64 is past any length
        match next.to_integer() {
            Ok(position) if position <= limit => up.push(next),
            _ => break,
        }
    }

    let mut down = vec![start.clone()];
    loop {
        let next = tree::clear_lowest_set_bit(down.last().unwrap_or(&start))?;
        if next == InfiniteBits::ZERO {
            break;
        }
        down.push(next);
    }
    debug!(len, index, up = up.len(), down = down.len(), "walked paths");
    Ok((up, down))
}

fn integer_or_wide(bits: &InfiniteBits) -> String {
    match bits.to_integer() {
        Ok(value) => value.to_string(),
        Err(_) => "(wider than i64)".to_string(),
    }
}
