//! SSD1963 command codes

/// Command bytes written while the D/C line is low.
pub struct Cmd;
#[allow(missing_docs)]
impl Cmd {
    // Init
    pub const SOFT_RESET: u8 = 0x01;
    pub const ENTER_NORMAL_MODE: u8 = 0x13;
    pub const SET_DISPLAY_ON: u8 = 0x29;
    pub const SET_ADDRESS_MODE: u8 = 0x36;
    pub const SET_LCD_MODE: u8 = 0xB0;
    pub const SET_HORI_PERIOD: u8 = 0xB4;
    pub const SET_VERT_PERIOD: u8 = 0xB6;
    pub const SET_PWM_CONF: u8 = 0xBE;
    pub const SET_PLL: u8 = 0xE0;
    pub const SET_PLL_MN: u8 = 0xE2;
    pub const SET_LSHIFT_FREQ: u8 = 0xE6;
    pub const SET_PIXEL_DATA_INTERFACE: u8 = 0xF0;

    // Update
    pub const SET_COLUMN_ADDRESS: u8 = 0x2A;
    pub const SET_PAGE_ADDRESS: u8 = 0x2B;
    pub const WRITE_MEMORY_START: u8 = 0x2C;
}

/*
Bring-up order used by the driver:
0x01 x3 - Soft Reset
0xE2 - Set PLL MN
0xE0 - Set PLL (enable, then lock)
0x01 - Soft Reset
0xE6 - Set LSHIFT (pixel clock) frequency
0xB0 - Set LCD mode
0xB4 - Set horizontal period
0xB6 - Set vertical period
0xF0 - Set pixel data interface
0x36 - Set address mode
0xBE - Set PWM configuration
0x13 - Enter normal mode
0x29 - Set display on
*/
