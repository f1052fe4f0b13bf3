//! SH1106 OLED Display Driver
//!
//! Driver for 128x64 SH1106-based OLED displays via blocking I2C.
//! All drawing goes to a local frame buffer; `flush` pushes it one page at
//! a time.

use embedded_hal::i2c::I2c;
use glyphcast_core::{Canvas, DisplayError, PixelDisplay};

use crate::framebuffer::FrameBuffer;
use crate::text::draw_status_text;

/// SH1106 I2C address (typically 0x3C or 0x3D)
pub const SH1106_ADDR: u8 = 0x3C;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// The 132-column SH1106 RAM centers a 128-pixel panel
const COLUMN_OFFSET: u8 = 2;

/// Control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SH1106 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Power-up sequence
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,                  // Enable charge pump
    cmd::SET_SEG_REMAP,    // Flip horizontally
    cmd::SET_COM_SCAN_DEC, // Flip vertically
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_CONTRAST,
    0xCF, // High contrast
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SH1106 OLED driver
pub struct Sh1106<I2C> {
    i2c: I2C,
    address: u8,
    buffer: FrameBuffer<WIDTH, PAGES>,
    initialized: bool,
}

impl<I2C: I2c> Sh1106<I2C> {
    /// Create a driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SH1106_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: FrameBuffer::new(),
            initialized: false,
        }
    }

    pub fn buffer(&self) -> &FrameBuffer<WIDTH, PAGES> {
        &self.buffer
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.command(if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF })
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.command(if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        })
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.write(&[CONTROL_COMMAND, cmd])
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.i2c.write(self.address, bytes).map_err(|_e| {
            debug!("i2c write to {} failed", self.address);
            DisplayError::Communication
        })
    }
}

impl<I2C: I2c> Canvas for Sh1106<I2C> {
    fn dimensions(&self) -> (u32, u32) {
        (WIDTH as u32, HEIGHT as u32)
    }

    fn set_pixel(&mut self, x: u32, y: u32) {
        self.buffer.set_pixel(x, y);
    }
}

impl<I2C: I2c> PixelDisplay for Sh1106<I2C> {
    fn init(&mut self) -> Result<(), DisplayError> {
        for &c in INIT_SEQUENCE {
            self.command(c)?;
        }
        self.buffer.clear();
        self.initialized = true;
        debug!("sh1106 at {} initialized", self.address);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.buffer.clear();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        match draw_status_text(&mut self.buffer, x, y, text) {
            Ok(_) => Ok(()),
            Err(never) => match never {},
        }
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN | (COLUMN_OFFSET & 0x0F))?;
            self.command(cmd::SET_HIGH_COLUMN | (COLUMN_OFFSET >> 4))?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            if let Some(bytes) = self.buffer.page(page) {
                data[1..].copy_from_slice(bytes);
            }
            self.write(&data)?;
        }

        Ok(())
    }
}
