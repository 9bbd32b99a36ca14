fn main() -> anyhow::Result<()> {
    lilt::runtime::run()
}
