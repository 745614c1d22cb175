use crate::cli::PathsArgs;
use crate::error::{CliError, Result};
use rafft::core::io::trajectory::{Connection, Trajectory};
use rafft::core::io::traits::TextFormat;
use std::io::Write;
use tracing::info;

pub fn run(args: PathsArgs) -> Result<()> {
    info!("Reading trajectory from {:?}", &args.input);
    let trajectory =
        Trajectory::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;

    let connections = trajectory.connections().map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;
    info!(
        blocks = trajectory.len(),
        connections = connections.len(),
        "Computed trajectory connectivity."
    );

    let stdout = std::io::stdout();
    write_connections(&mut stdout.lock(), &trajectory, &connections)?;
    Ok(())
}

/// One line per edge: `step from to`, followed by the two structures.
fn write_connections(
    out: &mut impl Write,
    trajectory: &Trajectory,
    connections: &[Connection],
) -> Result<()> {
    writeln!(out, "{}", trajectory.sequence)?;
    for c in connections {
        let from = &trajectory.steps[c.step - 1][c.from].structure;
        let to = &trajectory.steps[c.step][c.to].structure;
        writeln!(out, "{} {} {} {} {}", c.step, c.from, c.to, from, to)?;
    }
    Ok(())
}
