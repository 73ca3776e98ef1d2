pub fn run() -> anyhow::Result<()> {
    println!("orion {}", env!("CARGO_PKG_VERSION"));
    println!("BM25 ranking over a pre-built inverted index");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_output() {
        let result = run();
        assert!(result.is_ok());
    }
}
