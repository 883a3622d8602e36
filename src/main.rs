fn main() -> anyhow::Result<()> {
    catalog_portal::cli::commands::run()
}
