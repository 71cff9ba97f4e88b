//! Integrates sqrt(x) over [0, b] by hit-or-miss sampling and compares the
//! result with adaptive quadrature.
//!
//! Usage: `sqrt_comparison [domain_bound] [points] [seed]`
//! (defaults: 5.55, 1000, unseeded)

use mc_integral::{compare, GaussKronrod, IntegrationRequest, SampleCount, DEFAULT_POINTS};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let domain_bound: f64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 5.55,
    };
    let points: i64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => DEFAULT_POINTS as i64,
    };
    let seed: Option<u64> = args.next().map(|arg| arg.parse()).transpose()?;

    let mut request = IntegrationRequest::bounded_by_endpoint(domain_bound, f64::sqrt)?
        .with_sample_count(SampleCount::try_from(points)?);
    if let Some(seed) = seed {
        request = request.with_seed(seed);
    }

    let comparison = compare(&request, &GaussKronrod::default())?;
    println!(
        "Square calculated with Monte Carlo method = {:.4}",
        comparison.estimation.estimate
    );
    println!("Square calculated by integral = {:.4}", comparison.reference);
    println!("Difference = {:.4} %", comparison.difference_percent);
    Ok(())
}
