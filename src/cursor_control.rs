//! Pointer, button and screen capture control for X11-based systems.
//!
//! Pointer moves use `WarpPointer` on the root window, button presses are
//! injected through the XTEST extension and screenshots are read back from the
//! root window with `GetImage`.

use crate::{
    dispatcher::{InputSimulator, MouseButton},
    error::{Error, Result},
    utils::safe_cast::i32_to_screen_i16,
};
use image::RgbImage;
use log::{debug, info};
use x11rb::{
    connection::{Connection, RequestConnection},
    protocol::{
        xproto::{ConnectionExt, ImageFormat, ImageOrder, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT},
        xtest::{self, ConnectionExt as _},
    },
    rust_connection::RustConnection,
    CURRENT_TIME,
};

/// X11 pointer button numbers
const LEFT_BUTTON: u8 = 1;
const RIGHT_BUTTON: u8 = 3;

/// Input simulator backed by an X11 connection
pub struct CursorController {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
}

impl CursorController {
    /// Connect to the default display
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be reached or lacks XTEST
    pub fn new() -> Result<Self> {
        info!("Initializing X11 cursor controller");

        let (connection, screen_num) =
            RustConnection::connect(None).map_err(|e| Error::X11(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::X11("Failed to get screen".to_string()))?
            .clone();

        let xtest_present = connection
            .extension_information(xtest::X11_EXTENSION_NAME)
            .map_err(|e| Error::X11(format!("Failed to query XTEST extension: {e}")))?
            .is_some();
        if !xtest_present {
            return Err(Error::X11("XTEST extension not available".to_string()));
        }

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!("Connected to X11 display, screen: {}x{}", screen_width, screen_height);

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
        })
    }

    fn fake_button(&self, event_type: u8, button: MouseButton) -> Result<()> {
        let detail = match button {
            MouseButton::Left => LEFT_BUTTON,
            MouseButton::Right => RIGHT_BUTTON,
        };
        self.connection
            .xtest_fake_input(event_type, detail, CURRENT_TIME, self.screen.root, 0, 0, 0)
            .map_err(|e| Error::ActionDispatch(format!("Failed to inject {button:?} button event: {e}")))?;
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        self.connection
            .flush()
            .map_err(|e| Error::ActionDispatch(format!("Failed to flush connection: {e}")))
    }

    /// Bits per pixel the server uses for images at the root depth
    fn root_bits_per_pixel(&self) -> Option<u8> {
        self.connection
            .setup()
            .pixmap_formats
            .iter()
            .find(|format| format.depth == self.screen.root_depth)
            .map(|format| format.bits_per_pixel)
    }
}

impl InputSimulator for CursorController {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        let x = i32_to_screen_i16(x, u32::from(self.screen_width));
        let y = i32_to_screen_i16(y, u32::from(self.screen_height));

        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| Error::ActionDispatch(format!("Failed to warp pointer: {e}")))?;

        self.flush()
    }

    fn press(&mut self, button: MouseButton) -> Result<()> {
        self.fake_button(BUTTON_PRESS_EVENT, button)
    }

    fn release(&mut self, button: MouseButton) -> Result<()> {
        self.fake_button(BUTTON_RELEASE_EVENT, button)
    }

    fn double_click(&mut self) -> Result<()> {
        for _ in 0..2 {
            self.fake_button(BUTTON_PRESS_EVENT, MouseButton::Left)?;
            self.fake_button(BUTTON_RELEASE_EVENT, MouseButton::Left)?;
        }
        Ok(())
    }

    fn screenshot(&mut self) -> Result<RgbImage> {
        let bits_per_pixel = self.root_bits_per_pixel();
        if bits_per_pixel != Some(32) {
            return Err(Error::ActionDispatch(format!(
                "Unsupported root window pixel format: {bits_per_pixel:?} bits per pixel"
            )));
        }

        let reply = self
            .connection
            .get_image(
                ImageFormat::Z_PIXMAP,
                self.screen.root,
                0,
                0,
                self.screen_width,
                self.screen_height,
                u32::MAX,
            )
            .map_err(|e| Error::ActionDispatch(format!("Failed to request screen image: {e}")))?
            .reply()
            .map_err(|e| Error::ActionDispatch(format!("Failed to read screen image: {e}")))?;

        let lsb_first = self.connection.setup().image_byte_order == ImageOrder::LSB_FIRST;
        pixels_to_rgb(
            &reply.data,
            u32::from(self.screen_width),
            u32::from(self.screen_height),
            lsb_first,
        )
    }

    fn screen_size(&self) -> (u32, u32) {
        (u32::from(self.screen_width), u32::from(self.screen_height))
    }
}

/// Convert 32 bpp Z-pixmap data into an RGB image
///
/// LSB-first servers store pixels as B, G, R, pad; MSB-first as pad, R, G, B.
fn pixels_to_rgb(data: &[u8], width: u32, height: u32, lsb_first: bool) -> Result<RgbImage> {
    let expected = width as usize * height as usize * 4;
    if data.len() < expected {
        return Err(Error::ActionDispatch(format!(
            "Screen image too short: {} bytes, expected {expected}",
            data.len()
        )));
    }

    let rgb: Vec<u8> = data[..expected]
        .chunks_exact(4)
        .flat_map(|px| if lsb_first { [px[2], px[1], px[0]] } else { [px[1], px[2], px[3]] })
        .collect();

    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| Error::ActionDispatch("Screen image buffer size mismatch".to_string()))
}
