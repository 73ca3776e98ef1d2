use orion_core::Normalizer;

pub fn run(query: &str) -> anyhow::Result<()> {
    let tokens = Normalizer::shared().normalize(query);
    println!("{}", serde_json::to_string(&tokens)?);
    Ok(())
}
