fn main() -> anyhow::Result<()> {
  discoteca_lib::run()
}
