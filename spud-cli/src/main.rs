fn main() -> anyhow::Result<()> {
    spud_cli::run()
}
