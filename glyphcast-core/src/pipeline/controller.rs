//! Display pipeline controller
//!
//! Owns the panel, the glyph compositor and the delay provider, and walks a
//! list of texts through fetch, compose and render. Per-item failures are
//! reported and shown on the panel; they never stop the list.

use alloc::vec::Vec;
use core::fmt::Write as _;
use core::net::Ipv4Addr;

use embedded_hal::delay::DelayNs;
use glyphcast_protocol::FontSize;

use super::state::{ItemEvent, ItemState};
use crate::cache::CacheStats;
use crate::client::FontServiceClient;
use crate::compositor::LineCompositor;
use crate::config::DisplayConfig;
use crate::error::{CompositeError, InitializationError};
use crate::renderer::{RenderMode, Renderer};
use crate::traits::{Connectivity, DisplayError, GlyphSource, HttpClient, PixelDisplay};

pub const BOOT_TITLE: &str = "System Booting...";
pub const BOOT_DETAIL: &str = "OLED Ready";
pub const FETCHING_TITLE: &str = "Fetching Font...";
pub const FONT_ERROR_TITLE: &str = "Font Error!";
pub const FONT_ERROR_DETAIL: &str = "Check API server";
pub const WIFI_CONNECTING: &str = "Connecting WiFi";
pub const WIFI_CONNECTED: &str = "WiFi Connected!";
pub const WIFI_FAILED: &str = "WiFi Failed!";
pub const WIFI_TIMEOUT: &str = "Timeout";

/// Vertical position of the second status line (one 8px text row plus gap)
pub const STATUS_LINE_PITCH: i32 = 8 + 2;

/// Percentage of the default font size used by `display_small_text`
pub const SMALL_TEXT_PERCENT: u16 = 50;

const BOOT_HOLD_MS: u32 = 1000;
const WIFI_CONNECTED_HOLD_MS: u32 = 2000;

/// Per-call overrides for [`GlyphDisplay::display_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Font size for every item in the call
    pub font_size: Option<FontSize>,
    /// Marquee frame pause (ignored in static mode)
    pub frame_interval_ms: Option<u32>,
    /// Pause after each item
    pub delay_between_texts_ms: Option<u32>,
}

impl DisplayOptions {
    pub fn font_size(mut self, size: FontSize) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn frame_interval_ms(mut self, ms: u32) -> Self {
        self.frame_interval_ms = Some(ms);
        self
    }

    pub fn delay_between_texts_ms(mut self, ms: u32) -> Self {
        self.delay_between_texts_ms = Some(ms);
        self
    }
}

/// Why an item ended in [`ItemState::Failed`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ItemError {
    Composite(CompositeError),
    Display(DisplayError),
}

impl core::fmt::Display for ItemError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Composite(e) => write!(f, "{}", e),
            Self::Display(e) => write!(f, "{}", e),
        }
    }
}

/// Outcome of one text item
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ItemReport {
    /// Terminal state reached
    pub state: ItemState,
    /// Set when `state` is `Failed`
    pub error: Option<ItemError>,
    /// Frames flushed while rendering the composite
    pub frames: u32,
}

impl ItemReport {
    pub fn is_rendered(&self) -> bool {
        self.state == ItemState::Rendered
    }
}

/// Glyph display pipeline
pub struct GlyphDisplay<D, S, T> {
    display: D,
    compositor: LineCompositor<S>,
    delay: T,
    config: DisplayConfig,
}

impl<D, H, T> GlyphDisplay<D, FontServiceClient<H>, T>
where
    D: PixelDisplay,
    H: HttpClient,
    T: DelayNs,
{
    /// Build a pipeline that fetches glyphs over `http` from the configured
    /// font service
    pub fn with_http(
        display: D,
        http: H,
        delay: T,
        config: DisplayConfig,
    ) -> Result<Self, InitializationError> {
        let client = FontServiceClient::new(http, config.font_api_url.clone())
            .with_timeout_ms(config.request_timeout_ms);
        Self::new(display, client, delay, config)
    }
}

impl<D, S, T> GlyphDisplay<D, S, T>
where
    D: PixelDisplay,
    S: GlyphSource,
    T: DelayNs,
{
    /// Validate the configuration, bring up the panel and show the boot
    /// message
    pub fn new(
        mut display: D,
        source: S,
        delay: T,
        config: DisplayConfig,
    ) -> Result<Self, InitializationError> {
        config.validate()?;

        display.init().map_err(|e| {
            error!("display init failed: {}", e);
            e
        })?;

        let expected = (config.width, config.height);
        let actual = display.dimensions();
        if actual != expected {
            error!(
                "display is {}x{}, configured {}x{}",
                actual.0, actual.1, expected.0, expected.1
            );
            return Err(InitializationError::SizeMismatch { expected, actual });
        }

        let mut this = Self {
            display,
            compositor: LineCompositor::new(source),
            delay,
            config,
        };

        this.show_message(BOOT_TITLE, BOOT_DETAIL, 0)?;
        this.delay.delay_ms(BOOT_HOLD_MS);
        info!("display ready ({}x{})", expected.0, expected.1);

        Ok(this)
    }

    /// Show each text in turn with the configured defaults
    pub fn display<I>(&mut self, texts: I) -> Vec<ItemReport>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.display_with(texts, DisplayOptions::default())
    }

    /// Show each text at half the default font size
    pub fn display_small_text<I>(&mut self, texts: I) -> Vec<ItemReport>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.display_scaled(texts, SMALL_TEXT_PERCENT)
    }

    /// Show each text at `percent` of the default font size
    pub fn display_scaled<I>(&mut self, texts: I, percent: u16) -> Vec<ItemReport>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let size = self.config.default_font_size.scaled(percent);
        self.display_with(texts, DisplayOptions::default().font_size(size))
    }

    /// Show each text in turn, with per-call overrides
    pub fn display_with<I>(&mut self, texts: I, options: DisplayOptions) -> Vec<ItemReport>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let font_size = options.font_size.unwrap_or(self.config.default_font_size);
        let pause_ms = options
            .delay_between_texts_ms
            .unwrap_or(self.config.delay_between_texts_ms);

        let mut mode = self.config.render_mode();
        if let (RenderMode::Scroll(scroll), Some(ms)) = (&mut mode, options.frame_interval_ms) {
            scroll.frame_interval_ms = ms;
        }
        let renderer = Renderer::new(mode);

        let mut reports = Vec::new();
        for text in texts {
            let report = self.display_item(text.as_ref(), font_size, &renderer);
            reports.push(report);
            self.delay.delay_ms(pause_ms);
        }

        let rendered = reports.iter().filter(|r| r.is_rendered()).count();
        info!("displayed {}/{} texts", rendered, reports.len());
        reports
    }

    fn display_item(&mut self, text: &str, font_size: FontSize, renderer: &Renderer) -> ItemReport {
        let mut state = ItemState::Pending.transition(ItemEvent::Begin);
        info!("displaying \"{}\" @{}", text, font_size);

        if let Err(e) = self.show_message(FETCHING_TITLE, text, 0) {
            warn!("status message failed: {}", e);
        }

        let result = match self.compositor.compose_line(text, font_size) {
            Ok(composite) => {
                state = state.transition(ItemEvent::LineComposed);
                renderer
                    .render(&mut self.display, &mut self.delay, &composite)
                    .map_err(ItemError::Display)
            }
            Err(e) => Err(ItemError::Composite(e)),
        };

        match result {
            Ok(frames) => ItemReport {
                state: state.transition(ItemEvent::RenderComplete),
                error: None,
                frames,
            },
            Err(error) => {
                let event = match error {
                    ItemError::Composite(_) => ItemEvent::ComposeFailed,
                    ItemError::Display(_) => ItemEvent::RenderFailed,
                };
                warn!("\"{}\" failed: {}", text, error);

                let hold_ms = self.config.error_hold_ms;
                if let Err(e) = self.show_message(FONT_ERROR_TITLE, FONT_ERROR_DETAIL, hold_ms) {
                    warn!("placeholder failed: {}", e);
                }

                ItemReport {
                    state: state.transition(event),
                    error: Some(error),
                    frames: 0,
                }
            }
        }
    }

    /// Show one or two lines of status text
    ///
    /// With a non-zero `clear_after_ms` the message is held that long and the
    /// panel is cleared afterwards.
    pub fn show_message(
        &mut self,
        line1: &str,
        line2: &str,
        clear_after_ms: u32,
    ) -> Result<(), DisplayError> {
        self.display.clear()?;
        self.display.draw_text(0, 0, line1)?;
        if !line2.is_empty() {
            self.display.draw_text(0, STATUS_LINE_PITCH, line2)?;
        }
        self.display.flush()?;

        if clear_after_ms > 0 {
            self.delay.delay_ms(clear_after_ms);
            self.clear()?;
        }
        Ok(())
    }

    /// Blank the panel
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear()?;
        self.display.flush()
    }

    /// Join a network, reporting progress on the panel
    ///
    /// Returns the existing address without reconnecting if the link is
    /// already up. A failed join is `Ok(None)`; only panel errors are `Err`.
    pub fn connect_network<C: Connectivity + ?Sized>(
        &mut self,
        network: &mut C,
        ssid: &str,
        password: &str,
    ) -> Result<Option<Ipv4Addr>, DisplayError> {
        if let Some(addr) = network.address() {
            debug!("already connected");
            return Ok(Some(addr));
        }

        info!("joining \"{}\"", ssid);
        self.show_message(WIFI_CONNECTING, ssid, 0)?;

        match network.connect(ssid, password, self.config.wifi_timeout_s) {
            Some(addr) => {
                let mut ip: heapless::String<15> = heapless::String::new();
                // 15 bytes always fits a dotted quad
                let _ = write!(ip, "{}", addr);
                info!("connected, address {}", ip.as_str());
                self.show_message(WIFI_CONNECTED, &ip, WIFI_CONNECTED_HOLD_MS)?;
                Ok(Some(addr))
            }
            None => {
                warn!("join timed out after {}s", self.config.wifi_timeout_s);
                self.show_message(WIFI_FAILED, WIFI_TIMEOUT, 0)?;
                Ok(None)
            }
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Access the panel
    pub fn panel(&self) -> &D {
        &self.display
    }

    pub fn delay(&self) -> &T {
        &self.delay
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.compositor.cache().stats()
    }

    pub fn source(&self) -> &S {
        self.compositor.cache().source()
    }

    /// Release the panel and delay provider
    pub fn release(self) -> (D, T) {
        (self.display, self.delay)
    }
}
