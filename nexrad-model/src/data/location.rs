/// The radar station's geodetic position, decoded from the VOL data block of a Message 31 radial.
/// Legacy Message 1 files carry no such block, so a file built only from legacy radials has no
/// `Location`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub latitude: f32,
    pub longitude: f32,
    pub height_meters: i16,
    pub feedhorn_height_meters: u16,
}
