//! The `tabtheme` command-line editor.
//!
//! A thin shell over the [`tabtheme`] crate: every subcommand opens a
//! [`Session`](session::Session), performs one action, writes the document
//! back, and reports a validation summary.

use std::process::ExitCode;

use serde::Serialize;

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod session;

use cli::{Cli, Command, ConvertCommand};
use config::Config;
use output::{render_output, OutputMode, Render};

/// Renders `data` and prints it to stdout.
fn emit<T: Serialize + Render>(data: &T, mode: OutputMode) -> anyhow::Result<()> {
    println!("{}", render_output(data, mode)?);
    Ok(())
}

/// Runs one parsed command line. Validation failures exit with code 1.
pub fn run(cli: Cli, config: &Config) -> anyhow::Result<ExitCode> {
    let mode = cli.output;
    match cli.command {
        Command::New { palette, out } => {
            emit(&commands::new_theme(palette.as_deref(), out.as_deref(), config)?, mode)?
        }
        Command::Validate { file } => {
            let validated = commands::validate(&file, config)?;
            emit(&validated, mode)?;
            if !validated.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Show { file } => emit(&commands::show(&file, config)?, mode)?,
        Command::Add { target, element } => emit(
            &commands::add(&target.file, target.out.as_deref(), &element, config)?,
            mode,
        )?,
        Command::Remove { target, element } => emit(
            &commands::remove(&target.file, target.out.as_deref(), &element, config)?,
            mode,
        )?,
        Command::Set {
            target,
            element,
            attribute,
            value,
        } => emit(
            &commands::set(
                &target.file,
                target.out.as_deref(),
                &element,
                &attribute,
                &value,
                config,
            )?,
            mode,
        )?,
        Command::Unset {
            target,
            element,
            attribute,
        } => emit(
            &commands::unset(&target.file, target.out.as_deref(), &element, &attribute, config)?,
            mode,
        )?,
        Command::Base { target, theme } => emit(
            &commands::base(&target.file, target.out.as_deref(), &theme, config)?,
            mode,
        )?,
        Command::Palette { target, name } => emit(
            &commands::palette(&target.file, target.out.as_deref(), &name, config)?,
            mode,
        )?,
        Command::Replace { target, source } => emit(
            &commands::replace(&target.file, target.out.as_deref(), source.as_deref(), config)?,
            mode,
        )?,
        Command::Export { file, name, dir } => emit(
            &commands::export(&file, name.as_deref(), &dir, config)?,
            mode,
        )?,
        Command::Schema => emit(&commands::schema(config), mode)?,
        Command::Palettes => emit(&commands::palettes(config), mode)?,
        Command::Convert(convert) => {
            let converted = match convert {
                ConvertCommand::Hex { value } => commands::convert_hex(&value)?,
                ConvertCommand::Rgb { r, g, b } => commands::convert_rgb(r, g, b),
                ConvertCommand::Cmyk { c, m, y, k } => commands::convert_cmyk(c, m, y, k),
            };
            emit(&converted, mode)?
        }
    }
    Ok(ExitCode::SUCCESS)
}
