//! RUMBO pricing CLI
//!
//! Prices a single quote from command-line inputs. Supports JSON output
//! for API integration via --json.

use std::path::PathBuf;

use clap::Parser;

use rumbo_pricing::pricing::QuoteDetail;
use rumbo_pricing::{
    NpvEvaluator, PaymentFrequency, Product, QuoteEngine, QuoteRequest, Sex, SmokerStatus,
    StoredParameters, Tables,
};

#[derive(Parser, Debug)]
#[command(name = "rumbo-pricing", about = "Deferred-annuity pricing engine")]
struct Args {
    /// Product to quote (rumbo | endosos)
    #[arg(long, default_value = "rumbo")]
    product: String,

    /// Issue age
    #[arg(long, default_value_t = 35)]
    age: u32,

    /// Sex (M | F)
    #[arg(long, default_value = "M")]
    sex: String,

    /// Smoker
    #[arg(long, default_value_t = false)]
    smoker: bool,

    /// Payment frequency (monthly | quarterly | semiannual | annual)
    #[arg(long, default_value = "annual")]
    frequency: String,

    /// Policy term in years
    #[arg(long, default_value_t = 20)]
    term: u32,

    /// Premium payment period in years
    #[arg(long, default_value_t = 10)]
    payment_years: u32,

    /// Periodic premium
    #[arg(long, default_value_t = 10_000.0)]
    premium: f64,

    /// Fixed redemption percentage; omit to search for break-even
    #[arg(long)]
    redemption_pct: Option<f64>,

    /// Pricing tables JSON; embedded defaults when omitted
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Emit the full quote as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_request(args: &Args) -> Result<QuoteRequest, String> {
    let product = match args.product.to_lowercase().as_str() {
        "rumbo" => Product::Rumbo,
        "endosos" => Product::Endosos,
        other => return Err(format!("unknown product: {}", other)),
    };
    let sex = match args.sex.to_uppercase().as_str() {
        "M" => Sex::Male,
        "F" => Sex::Female,
        other => return Err(format!("unknown sex: {}", other)),
    };
    let frequency = match args.frequency.to_lowercase().as_str() {
        "monthly" => PaymentFrequency::Monthly,
        "quarterly" => PaymentFrequency::Quarterly,
        "semiannual" => PaymentFrequency::SemiAnnual,
        "annual" => PaymentFrequency::Annual,
        other => return Err(format!("unknown frequency: {}", other)),
    };
    Ok(QuoteRequest {
        product,
        age: args.age,
        sex,
        smoker: SmokerStatus::from_flag(args.smoker),
        frequency,
        policy_term_years: args.term,
        premium_payment_years: args.payment_years,
        premium: args.premium,
        redemption_percentage: args.redemption_pct,
    })
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let request = match parse_request(&args) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    };

    let tables = match &args.tables {
        Some(path) => match Tables::from_json_path(path) {
            Ok(tables) => tables,
            Err(err) => {
                eprintln!("Error loading tables: {}", err);
                std::process::exit(1);
            }
        },
        None => Tables::default_pricing(),
    };
    let stored = StoredParameters::default_rumbo();
    let engine = QuoteEngine::new(tables, stored);

    let result = match engine.price(&request) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("Error serializing result: {}", err);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("RUMBO Pricing Engine v0.1.0");
    println!("===========================\n");

    println!("Request:");
    println!("  Product: {:?}", request.product);
    println!("  Age: {}  Sex: {:?}  Smoker: {:?}", request.age, request.sex, request.smoker);
    println!("  Frequency: {:?}", request.frequency);
    println!(
        "  Term: {} years  Payment period: {} years",
        request.policy_term_years, request.premium_payment_years
    );
    println!("  Premium: {:.2}", request.premium);
    println!();

    match &result.detail {
        QuoteDetail::Rumbo(quote) => {
            println!("Result:");
            println!("  Redemption percentage: {:.6}%", quote.redemption_percentage);
            println!("  NPV at optimum: {:.6e}", quote.npv);
            println!(
                "  Evaluations: {}  Converged: {}",
                quote.evaluations, quote.converged
            );
            println!("  TREA: {:.4}%", quote.trea * 100.0);
            println!("  Total contribution: {:.2}", quote.total_contribution);
            println!("  Total redemption:   {:.2}", quote.total_redemption);
            println!("  Total gain:         {:.2}", quote.total_gain);

            println!("\nRedemption schedule:");
            println!("{:>5} {:>10} {:>16}", "Year", "Return%", "Surrender");
            println!("{}", "-".repeat(34));
            for row in &quote.redemption_schedule {
                println!(
                    "{:>5} {:>10.2} {:>16.2}",
                    row.policy_year, row.return_pct, row.surrender_value
                );
            }

            // First months of the cohort and flow detail for validation
            let stored = StoredParameters::default_rumbo();
            let tables = engine.tables();
            let computed = result.computed_parameters.clone();
            let evaluator = NpvEvaluator::new(&request, &stored, &computed, tables);
            let evaluation = evaluator.evaluate_full(quote.redemption_percentage);

            println!("\nMonthly detail (first 24 months):");
            println!(
                "{:>5} {:>12} {:>12} {:>12} {:>12} {:>12}",
                "Month", "AliveStart", "Premium", "Reserve", "MOCE", "ShFlow"
            );
            println!("{}", "-".repeat(70));
            for m in 0..24.min(evaluator.projection().months()) {
                println!(
                    "{:>5} {:>12.8} {:>12.2} {:>12.2} {:>12.4} {:>12.2}",
                    m + 1,
                    evaluator.projection().rows[m].alive_start,
                    evaluator.recurring_premiums()[m],
                    evaluation.reserve_balance[m],
                    evaluation.moce[m],
                    evaluation.shareholder_flow[m],
                );
            }
        }
        QuoteDetail::Endosos(quote) => {
            println!("Result:");
            println!("  Premium: {:.2}", quote.premium);
        }
    }
}
