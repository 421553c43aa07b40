//! The register configuration sent to the SSD1325 at bring-up.
//!
//! The values come from Newhaven's application note for the NHD-2.7-12864UCY3 128x64 module,
//! tweaked for image stability. They set analog drive parameters (clock, phase lengths, pre-charge
//! and COM deselect voltages, gray scale pulse widths) for that particular panel, so they are kept
//! as a literal table rather than derived from anything.

use crate::interface::DisplayInterface;

/// How the panel's high-voltage supply is provided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VccMode {
    /// VCC comes from an external supply.
    External,
    /// VCC is generated on the module by a switched-capacitor converter.
    SwitchCap,
}

impl Default for VccMode {
    fn default() -> Self {
        VccMode::SwitchCap
    }
}

/// Bring-up sequence as (opcode, operands) pairs, sent in order, one command burst each.
#[cfg_attr(rustfmt, rustfmt_skip)]
pub const INIT_SEQUENCE: &[(u8, &[u8])] = &[
    (0xAE, &[]),                 // display off, sleep mode
    (0xB3, &[0x33]),             // clock divide ratio / oscillator frequency
    (0xA8, &[0x3F]),             // multiplex ratio 1/64 duty
    (0xA2, &[0x4C]),             // display offset
    (0xA1, &[0x00]),             // display start line
    (0xAD, &[0x02]),             // master config: embedded DC-DC off, internal VCOMH
    (0xA0, &[0x56]),             // remap: vertical address increment, upper nibble is left
    (0x86, &[]),                 // full current range
    (0xB8, &[]),                 // gray scale table
    (0x01, &[0x11, 0x22, 0x32, 0x43, 0x54, 0x77, 0x77]), // gray scale pulse widths
    (0x81, &[0x40]),             // contrast
    (0xB2, &[0x31]),             // frame frequency (row period)
    (0xB1, &[0x55]),             // phase length
    (0xBC, &[0x10]),             // pre-charge voltage
    (0xB4, &[0x02]),             // pre-charge compensation level
    (0xB0, &[0x28]),             // pre-charge compensation enable
    (0xBE, &[0x1C]),             // VCOMH voltage
    (0xBF, &[0x02 | 0x0D]),      // VSL voltage
    (0xA5, &[]),                 // all pixels on
    (0xAF, &[]),                 // display on
    (0xA4, &[]),                 // normal display mode
    (0x75, &[0x00, 0x3F]),       // row address window 0-63
    (0x15, &[0x00, 0x3F]),       // column address window 0-63
    (0x24, &[0x00, 0x00, 0x3F, 0x3F, 0x00]), // reset the address window
];

/// Transmit `INIT_SEQUENCE` to the display at `iface`, stopping at the first failure.
pub(crate) fn send_init_sequence<DI>(iface: &mut DI) -> Result<(), DI::Error>
where
    DI: DisplayInterface,
{
    for &(cmd, args) in INIT_SEQUENCE {
        iface.send_command(cmd, args)?;
    }
    Ok(())
}
