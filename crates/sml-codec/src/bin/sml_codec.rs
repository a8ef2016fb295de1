fn main() -> anyhow::Result<()> {
    sml_codec::cli::run()
}
