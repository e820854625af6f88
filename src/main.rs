use anyhow::Result;
use proofdesk::shell::Shell;

fn main() -> Result<()> {
    env_logger::init();
    let mut shell = Shell::new()?;
    shell.run()
}
