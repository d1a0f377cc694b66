//! Running the player's status query.

use std::io;
use std::process::{ Command, ExitStatus };

use thiserror::Error;


/// Remote control program shipped with cmus.
pub const CMUS_REMOTE: &str = "cmus-remote";


/// Errors that can occur while querying the player.
#[derive( Debug, Error )]
pub enum QueryError {
    #[error( "Failed to run {program}" )]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error( "{program} exited with {status}{}", stderr_suffix( .stderr ) )]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}


fn stderr_suffix( stderr: &str ) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!( ": {}", stderr )
    }
}


/// Runs `<program> -Q` and returns its standard output.
///
/// @param program - Name or path of the remote control program
///
/// @returns The raw query output, or an error if the program could not be
/// started or exited unsuccessfully
pub fn query_status( program: &str ) -> Result<Vec<u8>, QueryError> {
    tracing::debug!( "Running {} -Q", program );

    let output = Command::new( program )
        .arg( "-Q" )
        .output()
        .map_err( |source| QueryError::Spawn { program: program.to_string(), source } )?;

    if !output.status.success() {
        return Err( QueryError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy( &output.stderr ).trim().to_string(),
        });
    }

    tracing::debug!( "Read {} bytes of status", output.stdout.len() );
    Ok( output.stdout )
}


#[cfg( test )]
mod tests {
    use super::*;


    #[test]
    fn test_missing_program() {
        let result = query_status( "cmus-status-test-no-such-program" );
        assert!( matches!( result, Err( QueryError::Spawn { .. } ) ) );
    }


    #[test]
    fn test_spawn_error_message() {
        let err = QueryError::Spawn {
            program: "cmus-remote".into(),
            source: io::Error::new( io::ErrorKind::NotFound, "not found" ),
        };
        assert_eq!( err.to_string(), "Failed to run cmus-remote" );
        assert_eq!( std::error::Error::source( &err ).map( |e| e.to_string() ), Some( "not found".into() ) );
    }


    #[cfg( unix )]
    #[test]
    fn test_failed_error_message() {
        use std::os::unix::process::ExitStatusExt;

        let err = QueryError::Failed {
            program: "cmus-remote".into(),
            status: ExitStatus::from_raw( 1 << 8 ),
            stderr: "cmus-remote: cmus is not running".into(),
        };
        assert_eq!(
            err.to_string(),
            "cmus-remote exited with exit status: 1: cmus-remote: cmus is not running"
        );

        let err = QueryError::Failed {
            program: "cmus-remote".into(),
            status: ExitStatus::from_raw( 1 << 8 ),
            stderr: String::new(),
        };
        assert_eq!( err.to_string(), "cmus-remote exited with exit status: 1" );
    }


    #[cfg( unix )]
    #[test]
    fn test_nonzero_exit() {
        // `false -Q` exits 1 and ignores its arguments
        let result = query_status( "false" );
        assert!( matches!( result, Err( QueryError::Failed { .. } ) ) );
    }
}
