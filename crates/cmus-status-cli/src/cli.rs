//! Command-line argument parsing for cmus-status.

use clap::Parser;

use cmus_status_core::format::DEFAULT_WIDTH;
use cmus_status_core::{ DisplayOptions, CMUS_REMOTE };


/// cmus-status - Print the artist, song title, status and elapsed time of cmus.
#[derive( Parser, Debug )]
#[command( name = "cmus-status" )]
#[command( version, about, long_about = None )]
pub struct Args {
    /// Include the volume percentage 0-100.
    #[arg( long )]
    pub volume: bool,

    /// Include the position/duration time.
    #[arg( long )]
    pub elapsed: bool,

    /// Maximum width of output.
    #[arg( long, default_value_t = DEFAULT_WIDTH )]
    pub width: usize,

    /// Remote control program to query.
    #[arg( long, value_name = "PATH", default_value = CMUS_REMOTE )]
    pub cmus_remote: String,

    /// Log more to stderr (-v info, -vv debug, -vvv trace).
    #[arg( short, long, action = clap::ArgAction::Count )]
    pub verbose: u8,
}


impl From<&Args> for DisplayOptions {
    fn from( args: &Args ) -> Self {
        Self {
            show_volume: args.volume,
            show_elapsed: args.elapsed,
            max_width: args.width,
        }
    }
}


#[cfg( test )]
mod tests {
    use super::*;


    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from( [ "cmus-status" ] ).unwrap();
        assert_eq!( args.cmus_remote, "cmus-remote" );
        assert_eq!( args.verbose, 0 );
        assert_eq!( DisplayOptions::from( &args ), DisplayOptions::default() );
    }


    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from( [
            "cmus-status", "--volume", "--elapsed", "--width", "40",
            "--cmus-remote", "/opt/cmus/bin/cmus-remote", "-vv",
        ] ).unwrap();

        let options = DisplayOptions::from( &args );
        assert!( options.show_volume );
        assert!( options.show_elapsed );
        assert_eq!( options.max_width, 40 );
        assert_eq!( args.cmus_remote, "/opt/cmus/bin/cmus-remote" );
        assert_eq!( args.verbose, 2 );
    }


    #[test]
    fn test_width_equals_form() {
        let args = Args::try_parse_from( [ "cmus-status", "--width=20" ] ).unwrap();
        assert_eq!( args.width, 20 );
    }


    #[test]
    fn test_invalid_width() {
        assert!( Args::try_parse_from( [ "cmus-status", "--width", "wide" ] ).is_err() );
        assert!( Args::try_parse_from( [ "cmus-status", "--width", "-5" ] ).is_err() );
    }


    #[test]
    fn test_command_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
