use clap::Subcommand;
use plugcheck::config::Config;
use plugcheck::PlugcheckResult;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Record the runtime and libc versions of the host binary
    SetHost {
        /// Go version of the host
        #[arg(short, long)]
        go: Option<String>,
        /// libc version of the host
        #[arg(short, long)]
        libc: Option<String>,
    },
}

pub fn run(cmd: ConfigCommands) -> PlugcheckResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load()?;
            print!("{}", config.to_yaml()?);
            Ok(())
        }
        ConfigCommands::SetHost { go, libc } => {
            let mut config = Config::load()?;
            set_host(&mut config, go, libc);
            config.save()?;

            println!("✓ Host go version: {}", config.host_go_version);
            println!("✓ Host libc version: {}", config.host_libc_version);
            Ok(())
        }
    }
}

fn set_host(config: &mut Config, go: Option<String>, libc: Option<String>) {
    if let Some(go) = go {
        config.host_go_version = go;
    }
    if let Some(libc) = libc {
        config.host_libc_version = libc;
    }
}
