//! cmus-status - Status bar line for the cmus music player

mod cli;

use std::io::{ self, Write };

use anyhow::{ Context, Result };
use clap::Parser;
use tracing::Level;

use cli::Args;

use cmus_status_core::{ format_status, query_status, DisplayOptions, StatusRecord };


/// Installs a stderr logger whose level follows `--verbose`.
fn init_logging( verbose: u8 ) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level( level )
        .with_writer( io::stderr )
        .without_time()
        .with_target( false )
        .init();
}


fn main() -> Result<()> {
    let args = Args::parse();
    init_logging( args.verbose );

    let options = DisplayOptions::from( &args );
    tracing::info!( "Display options: {:?}", options );

    let response = query_status( &args.cmus_remote )
        .with_context( || format!( "Failed to query player status via {}", args.cmus_remote ) )?;
    let record = StatusRecord::parse( &response );
    tracing::debug!( "Parsed status: {:?}", record );

    let line = format_status( &record, &options );

    let mut stdout = io::stdout().lock();
    stdout.write_all( line.as_bytes() )?;
    stdout.flush()?;

    Ok(())
}
