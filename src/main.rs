use photolibrary_lib::LaunchOptions;

fn main() -> anyhow::Result<()> {
    photolibrary_lib::run(LaunchOptions::from_args(std::env::args().skip(1)))
}
