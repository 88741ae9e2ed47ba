use plugcheck::config::Config;
use plugcheck::PlugcheckResult;

pub fn run() -> PlugcheckResult<()> {
    let config = Config::load()?;
    print!("{}", report(&config));
    Ok(())
}

fn report(config: &Config) -> String {
    format!(
        "plugcheck Version: {}\nGo Version: {}\nGlibc Version: {}\n",
        env!("CARGO_PKG_VERSION"),
        config.host_go_version,
        config.host_libc_version
    )
}
