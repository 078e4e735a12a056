use anyhow::Result;

fn main() -> Result<()> {
    let args = ext_copy::cli::parse();
    ext_copy::app::run(args)
}
