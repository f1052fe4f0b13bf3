//! End-to-end runs of the display pipeline against an in-process font
//! service: real query building, reply parsing, caching, composition and
//! rendering onto simulated panels.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use glyphcast_core::error::{ApplicationError, CompositeError, FetchError, ProtocolError};
use glyphcast_core::{
    DisplayConfig, DisplayOptions, FontSize, GlyphDisplay, HttpClient, HttpResponse, ItemError,
    ItemState, NetworkError,
};
use glyphcast_display::{Sh1106, VirtualDisplay};
use glyphcast_protocol::{blank_extent, percent_decode};

const BASE_URL: &str = "http://fonts.local:5000/api/font?";

/// Renders ASCII at half width, everything else square, spaces blank
#[derive(Default)]
struct FakeFontService {
    requests: Vec<String>,
    broken: Vec<char>,
    rejected: Vec<char>,
}

impl FakeFontService {
    fn query(url: &str) -> (char, u16) {
        let query = url.split_once('?').map(|(_, q)| q).unwrap_or_default();
        let mut text = String::new();
        let mut size = 0u16;
        for pair in query.split('&') {
            match pair.split_once('=') {
                Some(("text", value)) => {
                    text = String::from_utf8(percent_decode(value).unwrap()).unwrap()
                }
                Some(("font_size", value)) => size = value.parse().unwrap(),
                _ => {}
            }
        }
        (text.chars().next().unwrap(), size)
    }

    fn glyph_json(character: char, size: u16) -> String {
        let font_size = FontSize::new(size).unwrap();
        let (width, height, bit) = match character {
            ' ' => {
                let (w, h) = blank_extent(1, font_size);
                (w, h, "0")
            }
            c if c.is_ascii() => (size as u32 / 2, size as u32, "1"),
            _ => (size as u32, size as u32, "1"),
        };
        let row = format!("[{}]", vec![bit; width as usize].join(","));
        let rows = vec![row.as_str(); height as usize].join(",");
        format!(
            r#"{{"success": true, "width": {}, "height": {}, "bitmap": [{}]}}"#,
            width, height, rows
        )
    }
}

impl HttpClient for FakeFontService {
    fn get(&mut self, url: &str, _timeout_ms: u32) -> Result<HttpResponse, NetworkError> {
        self.requests.push(url.to_string());
        let (character, size) = Self::query(url);

        if self.broken.contains(&character) {
            return Ok(HttpResponse {
                status: 500,
                body: b"Internal Server Error".to_vec(),
            });
        }
        let body = if self.rejected.contains(&character) {
            r#"{"success": false, "error": "no glyph for character"}"#.to_string()
        } else {
            Self::glyph_json(character, size)
        };
        Ok(HttpResponse {
            status: 200,
            body: body.into_bytes(),
        })
    }
}

#[derive(Default)]
struct ClockDelay {
    elapsed_ms: u64,
}

impl DelayNs for ClockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ms += u64::from(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ms += u64::from(ms);
    }
}

fn config(scroll_mode: bool) -> DisplayConfig {
    DisplayConfig {
        font_api_url: BASE_URL.to_string(),
        scroll_mode,
        ..Default::default()
    }
}

fn run(
    service: &mut FakeFontService,
    scroll_mode: bool,
) -> GlyphDisplay<VirtualDisplay, glyphcast_core::FontServiceClient<&mut FakeFontService>, ClockDelay>
{
    GlyphDisplay::with_http(
        VirtualDisplay::new(),
        service,
        ClockDelay::default(),
        config(scroll_mode),
    )
    .unwrap()
}

#[test]
fn static_text_is_centered() {
    let mut service = FakeFontService::default();
    let mut pipeline = run(&mut service, false);

    let options = DisplayOptions::default().font_size(FontSize::new(16).unwrap());
    let reports = pipeline.display_with(["Hi"], options);
    assert_eq!(reports[0].state, ItemState::Rendered);

    // Two 8x16 glyphs centered on 128x64
    let visible = pipeline.panel().visible();
    assert_eq!(visible.count_set(), 16 * 16);
    assert!(visible.get(56, 24));
    assert!(visible.get(71, 39));
    assert!(!visible.get(55, 24));
    assert!(!visible.get(72, 24));
}

#[test]
fn mixed_script_queries_are_percent_encoded() {
    let mut service = FakeFontService::default();
    {
        let mut pipeline = run(&mut service, false);
        let reports = pipeline.display(["你 A"]);
        assert_eq!(reports[0].state, ItemState::Rendered);
        // 24 + 8 + 12 wide, 24 tall, the space is blank
        assert_eq!(pipeline.panel().visible().count_set(), (24 + 12) * 24);
    }

    assert_eq!(
        service.requests,
        vec![
            format!("{}text=%E4%BD%A0&font_size=24", BASE_URL),
            format!("{}text=%20&font_size=24", BASE_URL),
            format!("{}text=A&font_size=24", BASE_URL),
        ]
    );
}

#[test]
fn glyphs_are_fetched_once_per_session() {
    let mut service = FakeFontService::default();
    {
        let mut pipeline = run(&mut service, false);
        pipeline.display(["abc", "cab", "aaa"]);

        let stats = pipeline.cache_stats();
        assert_eq!(stats.misses, 3);
        assert_eq!(stats.hits, 6);
    }
    assert_eq!(service.requests.len(), 3);
}

#[test]
fn server_error_shows_placeholder_and_continues() {
    let mut service = FakeFontService {
        broken: vec!['!'],
        ..Default::default()
    };
    let mut pipeline = run(&mut service, false);

    let reports = pipeline.display(["ok!", "ok"]);
    assert_eq!(reports[0].state, ItemState::Failed);
    assert_eq!(
        reports[0].error,
        Some(ItemError::Composite(CompositeError::GlyphUnavailable {
            character: '!',
            source: FetchError::Protocol(ProtocolError::Status(500)),
        }))
    );
    assert_eq!(reports[1].state, ItemState::Rendered);
}

#[test]
fn rejected_character_is_an_application_error() {
    let mut service = FakeFontService {
        rejected: vec!['?'],
        ..Default::default()
    };
    let mut pipeline = run(&mut service, false);

    let reports = pipeline.display(["?"]);
    assert_eq!(
        reports[0].error,
        Some(ItemError::Composite(CompositeError::GlyphUnavailable {
            character: '?',
            source: FetchError::Application(ApplicationError {
                message: "no glyph for character".to_string(),
            }),
        }))
    );
    // Placeholder is held, then cleared
    assert_eq!(pipeline.panel().visible().count_set(), 0);
}

#[test]
fn marquee_runs_until_text_has_left() {
    let mut service = FakeFontService::default();
    let mut pipeline = run(&mut service, true);
    let flushes_before = pipeline.panel().flushes();
    let elapsed_before = pipeline.delay().elapsed_ms;

    let reports = pipeline.display(["AB"]);

    // 24px wide composite: offsets 0, 2, ..., 152
    assert_eq!(reports[0].frames, 77);
    // Status message, then every marquee frame
    assert_eq!(pipeline.panel().flushes() - flushes_before, 1 + 77);
    assert_eq!(pipeline.panel().visible().count_set(), 0);
    assert_eq!(
        pipeline.delay().elapsed_ms - elapsed_before,
        77 * 80 + 1000
    );
}

#[test]
fn odd_width_marquee_leaves_a_blank_panel() {
    let mut service = FakeFontService::default();
    let mut pipeline = run(&mut service, true);

    // One 9x18 glyph: 137px to travel at 2px per frame
    let options = DisplayOptions::default().font_size(FontSize::new(18).unwrap());
    let reports = pipeline.display_with(["A"], options);

    // Offsets 0, 2, ..., 136, then 137
    assert_eq!(reports[0].state, ItemState::Rendered);
    assert_eq!(reports[0].frames, 70);
    assert_eq!(pipeline.panel().visible().count_set(), 0);
}

/// Accepts everything and counts data transfers
#[derive(Default)]
struct CountingBus {
    data_writes: usize,
}

impl ErrorType for CountingBus {
    type Error = ErrorKind;
}

impl I2c for CountingBus {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations {
            if let Operation::Write([0x40, ..]) = op {
                self.data_writes += 1;
            }
        }
        Ok(())
    }
}

#[test]
fn sh1106_panel_end_to_end() {
    let mut service = FakeFontService::default();
    let mut pipeline = GlyphDisplay::with_http(
        Sh1106::new(CountingBus::default()),
        &mut service,
        ClockDelay::default(),
        config(false),
    )
    .unwrap();

    let reports = pipeline.display(["Hello"]);
    assert!(reports[0].is_rendered());

    let (panel, _) = pipeline.release();
    // Boot message, status message and the rendered line, eight pages each
    assert_eq!(panel.release().data_writes, 3 * 8);
}
