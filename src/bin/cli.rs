//! Matched bets CLI - lay stake calculator

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use matched_bets::core::inversion::{
    back_odds_for_return, break_even_lay_odds, lay_odds_for_return,
};
use matched_bets::core::lay::LayCalculator;
use matched_bets::models::OddsSolution;
use matched_bets::report::{
    best_index, format_bottom_line, format_top_line, header_bottom, render_json,
    render_solutions, render_solutions_json, HEADER_TOP,
};
use matched_bets::{BetKind, BetReturn, Commission};

#[derive(Parser)]
#[command(name = "matched-bets")]
#[command(author, version, about = "Matched betting lay stake calculator", long_about = None)]
#[command(group(ArgGroup::new("bet_type").args(["free", "qual"])))]
#[command(group(ArgGroup::new("solve").args(["target", "break_even"])))]
struct Cli {
    /// Back stake
    #[arg(required_unless_present = "interactive")]
    stake: Option<Decimal>,

    /// Back odds followed by the same number of lay odds
    /// (with --target/--break-even: back odds only, or lay odds with --solve-back)
    #[arg(required_unless_present = "interactive")]
    odds: Vec<Decimal>,

    /// Exchange commission rate
    #[arg(
        short = 'c',
        long,
        default_value = "0.02",
        env = "MATCHED_BETS_LAY_COMMISSION"
    )]
    lay_commission: Decimal,

    /// Bookmaker commission rate on winnings
    #[arg(long, default_value = "0", env = "MATCHED_BETS_BACK_COMMISSION")]
    back_commission: Decimal,

    /// Free bet, stake not returned (default)
    #[arg(short, long)]
    free: bool,

    /// Qualifying bet
    #[arg(short, long)]
    qual: bool,

    /// Keep the exact lay stake instead of rounding to cents
    #[arg(long)]
    no_round: bool,

    /// Solve for the odds that return this amount on both outcomes
    #[arg(long, allow_negative_numbers = true)]
    target: Option<Decimal>,

    /// Solve for the odds where the bet stops losing money
    #[arg(long)]
    break_even: bool,

    /// Treat the given odds as lay odds and solve for back odds
    #[arg(long, requires = "solve")]
    solve_back: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn kind(&self) -> BetKind {
        if self.qual {
            BetKind::Qualifying
        } else {
            BetKind::Free
        }
    }

    fn commission(&self) -> Commission {
        Commission::new(self.back_commission, self.lay_commission)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    if cli.no_color || cli.json {
        colored::control::set_override(false);
    }

    if cli.interactive {
        return run_interactive(cli.commission());
    }

    let stake = cli.stake.context("Missing back stake")?;

    if cli.target.is_some() || cli.break_even {
        let target = cli.target.unwrap_or(Decimal::ZERO);
        return run_solve(&cli, stake, target);
    }

    let calc = LayCalculator::new(cli.kind(), cli.commission(), !cli.no_round);
    tracing::debug!(
        "{} bet, stake {}, commission {:?}",
        calc.kind,
        stake,
        calc.commission
    );

    let bets = calc
        .calculate_flat(stake, &cli.odds)
        .context("Failed to match bets")?;

    if cli.json {
        println!("{}", render_json(&bets)?);
    } else {
        print_table(&bets);
    }

    Ok(())
}

/// Logging goes to stderr so stdout stays a clean report
fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    Ok(())
}

fn print_table(bets: &[BetReturn]) {
    println!("{}", HEADER_TOP.yellow().bold());
    println!("{}", header_bottom().yellow().bold());
    println!();

    let best = if bets.len() > 1 { best_index(bets) } else { None };

    for (i, bet) in bets.iter().enumerate() {
        let top = format_top_line(bet);
        let bottom = format_bottom_line(bet);

        if Some(i) == best {
            println!("{}", top.green());
            println!("{}", bottom.green());
        } else {
            println!("{}", top);
            println!("{}", bottom);
        }
    }
}

fn run_solve(cli: &Cli, stake: Decimal, target: Decimal) -> Result<()> {
    let kind = cli.kind();
    let commission = cli.commission();

    if cli.odds.is_empty() {
        anyhow::bail!("At least one odds value is required");
    }

    let solutions = cli
        .odds
        .iter()
        .map(|&odds| {
            if cli.solve_back {
                back_odds_for_return(kind, stake, odds, commission, target).map(|back_odds| {
                    OddsSolution {
                        back_odds,
                        lay_odds: odds,
                        target,
                    }
                })
            } else {
                let lay_odds = if cli.break_even {
                    break_even_lay_odds(kind, stake, odds, commission)
                } else {
                    lay_odds_for_return(kind, stake, odds, commission, target)
                };
                lay_odds.map(|lay_odds| OddsSolution {
                    back_odds: odds,
                    lay_odds,
                    target,
                })
            }
        })
        .collect::<matched_bets::Result<Vec<_>>>()
        .with_context(|| format!("Failed to solve odds for a return of {}", target))?;

    if cli.json {
        println!("{}", render_solutions_json(&solutions)?);
    } else {
        print!("{}", render_solutions(&solutions));
    }

    Ok(())
}

fn run_interactive(default_commission: Commission) -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!();

    let theme = ColorfulTheme::default();

    loop {
        let kinds = vec!["Free bet", "Qualifying bet"];
        let kind = match Select::with_theme(&theme)
            .with_prompt("Bet type")
            .items(&kinds)
            .default(0)
            .interact()?
        {
            1 => BetKind::Qualifying,
            _ => BetKind::Free,
        };

        let stake: Decimal = Input::with_theme(&theme)
            .with_prompt("Back stake")
            .default(dec!(10))
            .interact_text()?;

        let back_odds: Decimal = Input::with_theme(&theme)
            .with_prompt("Back odds")
            .interact_text()?;

        let lay_odds: Decimal = Input::with_theme(&theme)
            .with_prompt("Lay odds")
            .interact_text()?;

        let lay_commission: Decimal = Input::with_theme(&theme)
            .with_prompt("Exchange commission")
            .default(default_commission.lay)
            .interact_text()?;

        let commission = Commission::new(default_commission.back, lay_commission);
        let calc = LayCalculator::new(kind, commission, true);

        println!();
        match calc.calculate(stake, back_odds, lay_odds) {
            Ok(bet) => {
                print_table(std::slice::from_ref(&bet));
                println!();
                println!(
                    "{} lay {:.2} @ {} (liability {:.2}), {} {:.2}",
                    "→".green(),
                    bet.lay_stake,
                    bet.lay_odds,
                    bet.lay_liability().round_dp(2),
                    "guaranteed P/L".bold(),
                    bet.profit().round_dp(2)
                );
            }
            Err(e) => println!("{}", e.to_string().red()),
        }
        println!();

        let again = Confirm::with_theme(&theme)
            .with_prompt("Match another bet?")
            .default(true)
            .interact()?;

        if !again {
            break;
        }
        println!();
    }

    Ok(())
}
