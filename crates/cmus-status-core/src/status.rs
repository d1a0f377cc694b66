//! Parsing of `cmus-remote -Q` output.
//!
//! The query output is line oriented, one `key value` pair per line.
//! Parsing is permissive: lines that are not understood are skipped and
//! the affected fields keep their defaults.

use std::collections::HashMap;
use std::time::Duration;


/// Fallback used for missing title, artist and album tags.
pub const UNKNOWN: &str = "Unknown";


/// Playback state reported by the player.
#[derive( Debug, Clone, PartialEq, Eq, Default )]
pub enum PlaybackState {
    Playing,
    Paused,
    Stopped,

    /// Any other token, kept verbatim.
    Unknown( String ),

    /// No `status` line was seen.
    #[default]
    Missing,
}


impl PlaybackState {
    /// Maps a `status` token onto a state.
    pub fn from_token( token: &str ) -> Self {
        match token {
            "playing" => PlaybackState::Playing,
            "paused" => PlaybackState::Paused,
            "stopped" => PlaybackState::Stopped,
            other => PlaybackState::Unknown( other.to_string() ),
        }
    }
}


/// A single recognised line of query output.
#[derive( Debug, Clone, PartialEq, Eq )]
pub enum Line<'a> {
    Tag { name: &'a str, value: &'a str },
    VolumeLeft( u64 ),
    VolumeRight( u64 ),
    Status( &'a str ),
    File( &'a str ),
    Duration( u64 ),
    Position( u64 ),
}


impl<'a> Line<'a> {
    /// Parses one line of query output.
    ///
    /// @param line - A line without its terminator
    ///
    /// @returns The recognised line, or `None` if it should be skipped
    pub fn parse( line: &'a str ) -> Option<Self> {
        let ( cmd, rest ) = split_pair( line )?;

        match cmd {
            "tag" => {
                let ( name, value ) = split_pair( rest )?;
                Some( Line::Tag { name, value } )
            }
            "set" => {
                let ( name, value ) = split_pair( rest )?;
                match name {
                    "vol_left" => parse_int( value ).map( Line::VolumeLeft ),
                    "vol_right" => parse_int( value ).map( Line::VolumeRight ),
                    _ => None,
                }
            }
            "status" => Some( Line::Status( rest ) ),
            "file" => Some( Line::File( rest ) ),
            "duration" => parse_int( rest ).map( Line::Duration ),
            "position" => parse_int( rest ).map( Line::Position ),
            _ => None,
        }
    }
}


/// Splits on the first space. An empty value counts as no value.
fn split_pair( s: &str ) -> Option<( &str, &str )> {
    let ( key, value ) = s.split_once( ' ' )?;
    if value.is_empty() {
        return None;
    }
    Some(( key, value ))
}


/// Parses a decimal integer, clamping negative values to zero.
///
/// Values that do not fit an `i64` fail to parse and are skipped.
fn parse_int( s: &str ) -> Option<u64> {
    let v: i64 = s.parse().ok()?;
    Some( v.max( 0 ).unsigned_abs() )
}


/// Snapshot of the player state from one query.
#[derive( Debug, Clone, Default, PartialEq, Eq )]
pub struct StatusRecord {
    state: PlaybackState,
    file: String,
    duration: u64,
    position: u64,
    tags: HashMap<String, String>,
    vol_left: u64,
    vol_right: u64,
}


impl StatusRecord {
    /// Parses the raw output of a status query.
    ///
    /// Never fails. Invalid UTF-8 is replaced, `\r\n` line endings are
    /// accepted, and unrecognised or malformed lines are ignored.
    pub fn parse( response: &[u8] ) -> Self {
        let text = String::from_utf8_lossy( response );
        let mut record = Self::default();

        for raw in text.lines() {
            match Line::parse( raw ) {
                Some( line ) => record.apply( line ),
                None => tracing::trace!( "Skipping status line: {:?}", raw ),
            }
        }

        record
    }


    /// Applies a parsed line. Later lines overwrite earlier ones.
    pub fn apply( &mut self, line: Line<'_> ) {
        match line {
            Line::Tag { name, value } => {
                self.tags.insert( name.to_string(), value.to_string() );
            }
            Line::VolumeLeft( v ) => self.vol_left = v,
            Line::VolumeRight( v ) => self.vol_right = v,
            Line::Status( s ) => self.state = PlaybackState::from_token( s ),
            Line::File( f ) => self.file = f.to_string(),
            Line::Duration( d ) => self.duration = d,
            Line::Position( p ) => self.position = p,
        }
    }


    /// Returns the playback state.
    pub fn state( &self ) -> &PlaybackState {
        &self.state
    }


    /// Returns the raw `status` token, empty if none was reported.
    pub fn state_str( &self ) -> &str {
        match &self.state {
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
            PlaybackState::Unknown( token ) => token,
            PlaybackState::Missing => "",
        }
    }


    /// Path of the current file.
    pub fn file( &self ) -> &str {
        &self.file
    }


    /// Looks up a tag by name.
    pub fn tag( &self, name: &str ) -> Option<&str> {
        self.tags.get( name ).map( String::as_str )
    }


    pub fn title( &self ) -> &str {
        self.tag( "title" ).unwrap_or( UNKNOWN )
    }


    pub fn artist( &self ) -> &str {
        self.tag( "artist" ).unwrap_or( UNKNOWN )
    }


    pub fn album( &self ) -> &str {
        self.tag( "album" ).unwrap_or( UNKNOWN )
    }


    /// Length of the current track.
    pub fn duration( &self ) -> Duration {
        Duration::from_secs( self.duration )
    }


    /// Elapsed time in the current track.
    pub fn position( &self ) -> Duration {
        Duration::from_secs( self.position )
    }


    pub fn volume_left( &self ) -> u64 {
        self.vol_left
    }


    pub fn volume_right( &self ) -> u64 {
        self.vol_right
    }


    /// Volume percentage, assuming the channels are balanced.
    pub fn volume( &self ) -> u64 {
        self.vol_right
    }
}


#[cfg( test )]
mod tests {
    use super::*;


    const SAMPLE: &str = "status playing\n\
file /music/band/song.flac\n\
duration 200\n\
position 50\n\
tag artist Band\n\
tag album Record\n\
tag title Song\n\
tag tracknumber 3\n\
set aaa_mode all\n\
set vol_left 75\n\
set vol_right 80\n";


    #[test]
    fn test_parse_full_response() {
        let record = StatusRecord::parse( SAMPLE.as_bytes() );
        assert_eq!( record.state(), &PlaybackState::Playing );
        assert_eq!( record.state_str(), "playing" );
        assert_eq!( record.file(), "/music/band/song.flac" );
        assert_eq!( record.duration(), Duration::from_secs( 200 ) );
        assert_eq!( record.position(), Duration::from_secs( 50 ) );
        assert_eq!( record.artist(), "Band" );
        assert_eq!( record.title(), "Song" );
        assert_eq!( record.album(), "Record" );
        assert_eq!( record.tag( "tracknumber" ), Some( "3" ) );
        assert_eq!( record.volume_left(), 75 );
        assert_eq!( record.volume_right(), 80 );
        assert_eq!( record.volume(), 80 );
    }


    #[test]
    fn test_parse_is_repeatable() {
        let a = StatusRecord::parse( SAMPLE.as_bytes() );
        let b = StatusRecord::parse( SAMPLE.as_bytes() );
        assert_eq!( a, b );
    }


    #[test]
    fn test_missing_tags_fall_back_to_unknown() {
        let record = StatusRecord::parse( b"status paused\n" );
        assert_eq!( record.title(), UNKNOWN );
        assert_eq!( record.artist(), UNKNOWN );
        assert_eq!( record.album(), UNKNOWN );
        assert_eq!( record.tag( "title" ), None );
    }


    #[test]
    fn test_empty_input() {
        let record = StatusRecord::parse( b"" );
        assert_eq!( record, StatusRecord::default() );
        assert_eq!( record.state(), &PlaybackState::Missing );
    }


    #[test]
    fn test_malformed_integer_is_ignored() {
        let record = StatusRecord::parse( b"duration abc\nposition 1.5\nset vol_right loud\n" );
        assert_eq!( record.duration(), Duration::ZERO );
        assert_eq!( record.position(), Duration::ZERO );
        assert_eq!( record.volume(), 0 );
    }


    #[test]
    fn test_malformed_integer_keeps_previous_value() {
        let record = StatusRecord::parse( b"duration 120\nduration abc\n" );
        assert_eq!( record.duration(), Duration::from_secs( 120 ) );
    }


    #[test]
    fn test_negative_integer_clamps_to_zero() {
        let record = StatusRecord::parse( b"position -4\n" );
        assert_eq!( record.position(), Duration::ZERO );
    }


    #[test]
    fn test_tag_and_set_without_value_are_skipped() {
        let record = StatusRecord::parse( b"tag title\nset vol_right\ntag artist Band\n" );
        assert_eq!( record.title(), UNKNOWN );
        assert_eq!( record.volume(), 0 );
        assert_eq!( record.artist(), "Band" );
    }


    #[test]
    fn test_lines_without_value_are_skipped() {
        let record = StatusRecord::parse( b"status\nfile\nduration\n" );
        assert_eq!( record, StatusRecord::default() );
    }


    #[test]
    fn test_empty_remainder_is_skipped() {
        let record = StatusRecord::parse(
            b"status playing\ntag artist Band\ntag title Song\ntag title \nstatus \nset vol_right \nfile \n"
        );
        assert_eq!( record.state(), &PlaybackState::Playing );
        assert_eq!( record.title(), "Song" );
        assert_eq!( record.artist(), "Band" );
        assert_eq!( record.volume(), 0 );
        assert_eq!( record.file(), "" );
        assert_eq!( Line::parse( "status " ), None );
        assert_eq!( Line::parse( "tag title " ), None );
    }


    #[test]
    fn test_large_integer_is_kept() {
        let record = StatusRecord::parse( b"duration 5000000000\n" );
        assert_eq!( record.duration(), Duration::from_secs( 5_000_000_000 ) );
    }


    #[test]
    fn test_out_of_range_integer_is_ignored() {
        let record = StatusRecord::parse( b"duration 30\nduration 99999999999999999999\n" );
        assert_eq!( record.duration(), Duration::from_secs( 30 ) );
    }


    #[test]
    fn test_state_str_follows_state() {
        assert_eq!( StatusRecord::parse( b"status paused\n" ).state_str(), "paused" );
        assert_eq!( StatusRecord::parse( b"status buffering\n" ).state_str(), "buffering" );
        assert_eq!( StatusRecord::default().state_str(), "" );
    }


    #[test]
    fn test_last_write_wins() {
        let record = StatusRecord::parse(
            b"tag title First\ntag title Second\nset vol_right 10\nset vol_right 20\nstatus playing\nstatus paused\n"
        );
        assert_eq!( record.title(), "Second" );
        assert_eq!( record.volume(), 20 );
        assert_eq!( record.state(), &PlaybackState::Paused );
    }


    #[test]
    fn test_values_keep_inner_spaces() {
        let record = StatusRecord::parse( b"tag title A Long Title\nfile /a b/c d.mp3\n" );
        assert_eq!( record.title(), "A Long Title" );
        assert_eq!( record.file(), "/a b/c d.mp3" );
    }


    #[test]
    fn test_unknown_status_is_kept() {
        let record = StatusRecord::parse( b"status buffering\n" );
        assert_eq!( record.state(), &PlaybackState::Unknown( "buffering".into() ) );
    }


    #[test]
    fn test_unknown_commands_are_ignored() {
        let record = StatusRecord::parse( b"bogus line here\nset shuffle true\nstatus stopped\n" );
        assert_eq!( record.state(), &PlaybackState::Stopped );
    }


    #[test]
    fn test_crlf_line_endings() {
        let record = StatusRecord::parse( b"status playing\r\nduration 10\r\ntag title Song\r\n" );
        assert_eq!( record.state(), &PlaybackState::Playing );
        assert_eq!( record.duration(), Duration::from_secs( 10 ) );
        assert_eq!( record.title(), "Song" );
    }


    #[test]
    fn test_invalid_utf8_is_replaced() {
        let record = StatusRecord::parse( b"tag title Caf\xe9\nduration 5\n" );
        assert_eq!( record.title(), "Caf\u{fffd}" );
        assert_eq!( record.duration(), Duration::from_secs( 5 ) );
    }


    #[test]
    fn test_line_parse() {
        assert_eq!( Line::parse( "tag artist The Band" ), Some( Line::Tag { name: "artist", value: "The Band" } ) );
        assert_eq!( Line::parse( "set vol_left 42" ), Some( Line::VolumeLeft( 42 ) ) );
        assert_eq!( Line::parse( "set softvol false" ), None );
        assert_eq!( Line::parse( "status" ), None );
        assert_eq!( Line::parse( "" ), None );
    }
}
