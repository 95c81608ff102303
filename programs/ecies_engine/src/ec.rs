//! secp256k1 point multiplication
//!
//! Thin wrapper over k256 that speaks in raw 32-byte big-endian affine
//! coordinates, the same shape an on-chain `ecMul` precompile would take.
//! A result at infinity is never returned: it surfaces as
//! `EciesError::DegeneratePoint` so the whole instruction fails.

use anchor_lang::prelude::*;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar};

use crate::error::EciesError;

/// Affine (x, y) coordinates, big-endian
pub type Coordinates = ([u8; 32], [u8; 32]);

/// Multiply the point (x, y) by `scalar`
pub fn mul(x: &[u8; 32], y: &[u8; 32], scalar: &[u8; 32]) -> Result<Coordinates> {
    let point = point_from_coordinates(x, y)?;
    let scalar = scalar_from_bytes(scalar)?;
    to_coordinates(point * scalar)
}

/// Multiply the secp256k1 base point by `scalar`
pub fn mul_generator(scalar: &[u8; 32]) -> Result<Coordinates> {
    let scalar = scalar_from_bytes(scalar)?;
    to_coordinates(ProjectivePoint::GENERATOR * scalar)
}

fn scalar_from_bytes(bytes: &[u8; 32]) -> Result<Scalar> {
    Option::<Scalar>::from(Scalar::from_repr(FieldBytes::clone_from_slice(bytes)))
        .ok_or_else(|| error!(EciesError::InvalidScalar))
}

fn point_from_coordinates(x: &[u8; 32], y: &[u8; 32]) -> Result<ProjectivePoint> {
    let encoded = EncodedPoint::from_affine_coordinates(
        FieldBytes::from_slice(x),
        FieldBytes::from_slice(y),
        false,
    );
    let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .ok_or_else(|| error!(EciesError::InvalidPublicKey))?;
    Ok(ProjectivePoint::from(affine))
}

fn to_coordinates(point: ProjectivePoint) -> Result<Coordinates> {
    let encoded = AffinePoint::from(point).to_encoded_point(false);
    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => {
            let mut out_x = [0u8; 32];
            let mut out_y = [0u8; 32];
            out_x.copy_from_slice(x);
            out_y.copy_from_slice(y);
            Ok((out_x, out_y))
        }
        _ => Err(error!(EciesError::DegeneratePoint)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(n: u64) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[24..].copy_from_slice(&n.to_be_bytes());
        out
    }

    fn hex32(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).unwrap();
        }
        out
    }

    #[test]
    fn generator_times_one_is_base_point() {
        let (x, y) = mul_generator(&scalar(1)).unwrap();
        assert_eq!(
            x,
            hex32("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
        );
        assert_eq!(
            y,
            hex32("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8")
        );
    }

    #[test]
    fn diffie_hellman_agrees() {
        let (ax, ay) = mul_generator(&scalar(0xa11ce)).unwrap();
        let (bx, by) = mul_generator(&scalar(0xb0b)).unwrap();
        assert_eq!(
            mul(&bx, &by, &scalar(0xa11ce)).unwrap(),
            mul(&ax, &ay, &scalar(0xb0b)).unwrap()
        );
    }

    #[test]
    fn zero_scalar_is_degenerate() {
        let err = mul_generator(&[0u8; 32]).unwrap_err();
        assert_eq!(err, EciesError::DegeneratePoint.into());
    }

    #[test]
    fn scalar_above_order_is_rejected() {
        let err = mul_generator(&[0xff; 32]).unwrap_err();
        assert_eq!(err, EciesError::InvalidScalar.into());
    }

    #[test]
    fn point_off_curve_is_rejected() {
        let (x, mut y) = mul_generator(&scalar(7)).unwrap();
        y[31] ^= 1;
        let err = mul(&x, &y, &scalar(3)).unwrap_err();
        assert_eq!(err, EciesError::InvalidPublicKey.into());
    }
}
