//! Bit interleaving of in-face `(i, j)` coordinates.
//!
//! `i` occupies the even bits and `j` the odd bits, so the four children of a
//! cell differ in their two lowest bits.

fn spread(v: u32) -> u64 {
    let mut x = v as u64;
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    (x | (x << 1)) & 0x5555_5555_5555_5555
}

fn compact(v: u64) -> u32 {
    let mut x = v & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF_0000_FFFF;
    ((x | (x >> 16)) & 0x0000_0000_FFFF_FFFF) as u32
}

pub(crate) fn ij_to_z(i: u32, j: u32) -> u64 {
    spread(i) | (spread(j) << 1)
}

pub(crate) fn z_to_ij(z: u64) -> (u32, u32) {
    (compact(z), compact(z >> 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values() {
        assert_eq!(ij_to_z(0, 0), 0);
        assert_eq!(ij_to_z(1, 0), 1);
        assert_eq!(ij_to_z(0, 1), 2);
        assert_eq!(ij_to_z(1, 1), 3);
        assert_eq!(ij_to_z(2, 0), 4);
        assert_eq!(z_to_ij(0b1110), (2, 3));
    }

    #[test]
    fn test_depth_max_coordinates() {
        let max = (1u32 << 29) - 1;
        let z = ij_to_z(max, 0);
        assert_eq!(z, 0x0155_5555_5555_5555);
        assert_eq!(z_to_ij(z), (max, 0));
        assert_eq!(z_to_ij(ij_to_z(12345, max)), (12345, max));
    }
}
