//! Single-line status formatting.
//!
//! Builds `<glyph>[<volume>% ][<position>/<duration> ]<artist> - <title>`
//! and trims the artist/title part from the front so the whole line fits
//! within the configured width.

use std::time::Duration;

use crate::status::{ PlaybackState, StatusRecord };


/// Default maximum width of the status line.
pub const DEFAULT_WIDTH: usize = 60;

pub const PLAY: &str = "> ";
pub const STOP: &str = "# ";
pub const PAUSE: &str = "||";
pub const NONE: &str = "  ";


/// Controls which parts of the status line are shown.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct DisplayOptions {
    /// Include the volume percentage.
    pub show_volume: bool,

    /// Include `position/duration`.
    pub show_elapsed: bool,

    /// Maximum width in characters.
    pub max_width: usize,
}


impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_volume: false,
            show_elapsed: false,
            max_width: DEFAULT_WIDTH,
        }
    }
}


/// Returns the two character glyph for a playback state.
pub fn glyph( state: &PlaybackState ) -> &'static str {
    match state {
        PlaybackState::Playing => PLAY,
        PlaybackState::Stopped => STOP,
        PlaybackState::Paused => PAUSE,
        PlaybackState::Unknown( _ ) | PlaybackState::Missing => NONE,
    }
}


/// Formats a duration as whole seconds, e.g. `"200s"`.
pub fn format_seconds( d: Duration ) -> String {
    format!( "{}s", d.as_secs() )
}


/// Drops characters from the front of `s` so at most `keep` remain.
///
/// Counts and slices by `char`, so the result is always valid UTF-8.
fn keep_tail( s: &str, keep: usize ) -> &str {
    let len = s.chars().count();
    let trim = len.saturating_sub( keep );
    match s.char_indices().nth( trim ) {
        Some(( idx, _ )) => &s[ idx.. ],
        None => "",
    }
}


/// Renders the status line for a record.
///
/// @param record - Parsed player status
/// @param options - Which fields to show and the width limit
///
/// @returns The status line, without a trailing newline
pub fn format_status( record: &StatusRecord, options: &DisplayOptions ) -> String {
    let mut line = String::with_capacity( options.max_width );
    line.push_str( glyph( record.state() ) );

    if options.show_volume {
        line.push_str( &format!( "{}% ", record.volume() ) );
    }
    if options.show_elapsed {
        line.push_str( &format!(
            "{}/{} ",
            format_seconds( record.position() ),
            format_seconds( record.duration() ),
        ));
    }

    let song = format!( "{} - {}", record.artist(), record.title() );
    let room = options.max_width.saturating_sub( line.chars().count() );
    let kept = keep_tail( &song, room );

    if kept.len() < song.len() {
        tracing::debug!( "Trimmed {:?} to {:?} to fit width {}", song, kept, options.max_width );
    }
    line.push_str( kept );

    line
}


#[cfg( test )]
mod tests {
    use super::*;


    const BASE: &str = "status playing\ntag title Song\ntag artist Band\nduration 200\nposition 50\n";


    fn render( input: &str, options: DisplayOptions ) -> String {
        format_status( &StatusRecord::parse( input.as_bytes() ), &options )
    }


    #[test]
    fn test_default_options() {
        assert_eq!( render( BASE, DisplayOptions::default() ), "> Band - Song" );
    }


    #[test]
    fn test_elapsed() {
        let options = DisplayOptions { show_elapsed: true, ..Default::default() };
        assert_eq!( render( BASE, options ), "> 50s/200s Band - Song" );
    }


    #[test]
    fn test_volume_follows_glyph() {
        let input = format!( "{}set vol_right 80\n", BASE );
        let options = DisplayOptions { show_volume: true, ..Default::default() };
        assert_eq!( render( &input, options ), "> 80% Band - Song" );
    }


    #[test]
    fn test_volume_and_elapsed() {
        let input = format!( "{}set vol_left 70\nset vol_right 80\n", BASE );
        let options = DisplayOptions { show_volume: true, show_elapsed: true, ..Default::default() };
        assert_eq!( render( &input, options ), "> 80% 50s/200s Band - Song" );
    }


    #[test]
    fn test_missing_tags() {
        assert_eq!( render( "status paused\n", DisplayOptions::default() ), "||Unknown - Unknown" );
    }


    #[test]
    fn test_empty_values_do_not_clobber_line() {
        let input = "status playing\ntag artist Band\ntag title Song\ntag title \nstatus \n";
        assert_eq!( render( input, DisplayOptions::default() ), "> Band - Song" );
    }


    #[test]
    fn test_long_duration_is_not_capped() {
        let input = format!( "{}duration 5000000000\n", BASE );
        let options = DisplayOptions { show_elapsed: true, ..Default::default() };
        assert_eq!( render( &input, options ), "> 50s/5000000000s Band - Song" );
    }


    #[test]
    fn test_glyphs() {
        assert_eq!( glyph( &PlaybackState::Playing ), "> " );
        assert_eq!( glyph( &PlaybackState::Stopped ), "# " );
        assert_eq!( glyph( &PlaybackState::Paused ), "||" );
        assert_eq!( glyph( &PlaybackState::Unknown( "buffering".into() ) ), "  " );
        assert_eq!( glyph( &PlaybackState::Missing ), "  " );
    }


    #[test]
    fn test_unknown_state_renders_blank_glyph() {
        let out = render( "status buffering\ntag artist A\ntag title T\n", DisplayOptions::default() );
        assert_eq!( out, "  A - T" );
    }


    #[test]
    fn test_truncates_song_from_front() {
        let options = DisplayOptions { max_width: 8, ..Default::default() };
        let out = render( BASE, options );
        assert_eq!( out, "> - Song" );
        assert_eq!( out.chars().count(), 8 );
    }


    #[test]
    fn test_truncation_keeps_optional_fields() {
        let options = DisplayOptions { show_elapsed: true, max_width: 14, ..Default::default() };
        assert_eq!( render( BASE, options ), "> 50s/200s ong" );
    }


    #[test]
    fn test_exact_fit_is_untouched() {
        let options = DisplayOptions { max_width: 13, ..Default::default() };
        assert_eq!( render( BASE, options ), "> Band - Song" );
    }


    #[test]
    fn test_prefix_wider_than_limit_drops_song() {
        let options = DisplayOptions { show_elapsed: true, max_width: 4, ..Default::default() };
        assert_eq!( render( BASE, options ), "> 50s/200s " );
    }


    #[test]
    fn test_truncation_by_char() {
        let input = "status playing\ntag artist Björk\ntag title Jóga\n";
        let options = DisplayOptions { max_width: 12, ..Default::default() };
        let out = render( input, options );
        assert_eq!( out, "> örk - Jóga" );
        assert_eq!( out.chars().count(), 12 );
    }


    #[test]
    fn test_width_never_exceeded() {
        let titles = [ "", "x", "Short", "A much longer title than fits anywhere", "日本語のタイトル" ];
        for title in titles {
            let input = format!( "status stopped\ntag artist Ärtist\ntag title {}\n", title );
            for max_width in 4..60 {
                let options = DisplayOptions { max_width, ..Default::default() };
                let out = render( &input, options );
                assert!( out.chars().count() <= max_width, "{:?} exceeds {}", out, max_width );
                assert!( out.starts_with( "# " ) );
            }
        }
    }


    #[test]
    fn test_format_seconds() {
        assert_eq!( format_seconds( Duration::ZERO ), "0s" );
        assert_eq!( format_seconds( Duration::from_secs( 3 ) ), "3s" );
        assert_eq!( format_seconds( Duration::from_millis( 3999 ) ), "3s" );
    }


    #[test]
    fn test_keep_tail() {
        assert_eq!( keep_tail( "abcdef", 3 ), "def" );
        assert_eq!( keep_tail( "abc", 10 ), "abc" );
        assert_eq!( keep_tail( "abc", 0 ), "" );
        assert_eq!( keep_tail( "añb", 2 ), "ñb" );
    }
}
