use rhuff::{CodeAssigner, SymbolSet, TreeBuilder};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> rhuff::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let symbols: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(10_000);
    let iterations: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(200);

    let alphabet = SymbolSet::new((1..=symbols).map(|i| (format!("sym{i}"), 1.0 / i as f64)))?;
    let total = alphabet.total_weight();
    info!(symbols, iterations, total, "profiling code construction");

    for radix in [2usize, 3, 8, 36, 64] {
        let builder = TreeBuilder::new(radix)?;
        let mut table = None;
        for _ in 0..iterations {
            let tree = builder.build(&alphabet)?;
            table = Some(CodeAssigner::assign(&tree));
        }

        if let Some(table) = table {
            let expected: f64 = alphabet
                .iter()
                .filter_map(|s| table.get(&s.id).map(|c| s.weight * c.len() as f64))
                .sum::<f64>()
                / total;
            let deepest = table.iter().max_by_key(|(_, c)| c.len());
            if let Some((id, code)) = deepest {
                info!(
                    radix,
                    expected,
                    longest = code.len(),
                    deepest = id,
                    weight = alphabet.weight(id).unwrap_or_default(),
                    "done"
                );
            }
        }
    }
    Ok(())
}
