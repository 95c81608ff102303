//! ECIES sealing and opening
//!
//! encrypt:
//!   R = k * G                      (ephemeral public key)
//!   S = k * Q                      (shared secret, Q = recipient key)
//!   key = sha256(S.x || S.y)
//!   c = data XOR key
//!   mac = sha256(c || R.x || R.y)
//!
//! decrypt recomputes S = d * R with the caller-supplied private key d.
//! The MAC does not depend on the symmetric key, so a wrong d passes every
//! check and opens to an unrelated 32-byte value. Callers must verify the
//! plaintext against their own expectations.

use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::ec;
use crate::error::EciesError;
use crate::state::Ciphertext;

/// Sealed data can be opened for 24 hours after encryption
pub const DECRYPT_WINDOW_SECONDS: i64 = 24 * 60 * 60;

/// PINs are at most 6 decimal digits
pub const MAX_PIN: u32 = 999_999;

/// Identity allowed to open a ciphertext, plus the PIN they present
#[derive(Clone, Copy, Debug)]
pub struct Credentials {
    pub caller: Pubkey,
    pub owner: Pubkey,
    pub backup_wallet: Pubkey,
    pub pin: u32,
    pub pin_hash: [u8; 32],
}

impl Credentials {
    fn caller_is_authorized(&self) -> bool {
        let is_owner = self.owner != Pubkey::default() && self.caller == self.owner;
        let is_backup =
            self.backup_wallet != Pubkey::default() && self.caller == self.backup_wallet;
        is_owner || is_backup
    }
}

/// Result of a successful open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opened {
    pub plaintext: [u8; 32],
    pub symmetric_key: [u8; 32],
}

/// sha256 of the PIN encoded as little-endian u32
pub fn pin_hash(pin: u32) -> [u8; 32] {
    hashv(&[&pin.to_le_bytes()]).to_bytes()
}

pub fn symmetric_key(shared_x: &[u8; 32], shared_y: &[u8; 32]) -> [u8; 32] {
    hashv(&[shared_x, shared_y]).to_bytes()
}

pub fn compute_mac(ciphertext: &[u8; 32], ephemeral_x: &[u8; 32], ephemeral_y: &[u8; 32]) -> [u8; 32] {
    hashv(&[ciphertext, ephemeral_x, ephemeral_y]).to_bytes()
}

/// Fingerprint of a symmetric key, safe to publish in events
pub fn key_fingerprint(key: &[u8; 32]) -> [u8; 32] {
    hashv(&[key]).to_bytes()
}

fn xor_block(block: &[u8; 32], key: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = block[i] ^ key[i];
    }
    out
}

/// Seal `data` to the recipient public key using `ephemeral_priv`
pub fn seal(
    data: &[u8; 32],
    recipient_pub_x: &[u8; 32],
    recipient_pub_y: &[u8; 32],
    ephemeral_priv: &[u8; 32],
    now: i64,
) -> Result<Ciphertext> {
    require!(
        *recipient_pub_x != [0u8; 32] && *recipient_pub_y != [0u8; 32],
        EciesError::InvalidPublicKey
    );

    let (ephemeral_pub_x, ephemeral_pub_y) = ec::mul_generator(ephemeral_priv)?;
    let (shared_x, shared_y) = ec::mul(recipient_pub_x, recipient_pub_y, ephemeral_priv)?;

    let key = symmetric_key(&shared_x, &shared_y);
    let ciphertext = xor_block(data, &key);
    let mac = compute_mac(&ciphertext, &ephemeral_pub_x, &ephemeral_pub_y);

    Ok(Ciphertext {
        ephemeral_pub_x,
        ephemeral_pub_y,
        ciphertext,
        mac,
        created_at: now,
    })
}

/// Open a ciphertext after checking caller, window, PIN and MAC, in that order
pub fn open(
    sealed: &Ciphertext,
    recipient_priv: &[u8; 32],
    credentials: &Credentials,
    now: i64,
) -> Result<Opened> {
    require!(credentials.caller_is_authorized(), EciesError::Unauthorized);

    let deadline = sealed
        .created_at
        .checked_add(DECRYPT_WINDOW_SECONDS)
        .ok_or(EciesError::ArithmeticOverflow)?;
    require!(now <= deadline, EciesError::DecryptWindowExpired);

    require!(credentials.pin <= MAX_PIN, EciesError::InvalidPin);
    require!(
        pin_hash(credentials.pin) == credentials.pin_hash,
        EciesError::PinMismatch
    );

    let expected_mac = compute_mac(
        &sealed.ciphertext,
        &sealed.ephemeral_pub_x,
        &sealed.ephemeral_pub_y,
    );
    require!(expected_mac == sealed.mac, EciesError::MacMismatch);

    let (shared_x, shared_y) =
        ec::mul(&sealed.ephemeral_pub_x, &sealed.ephemeral_pub_y, recipient_priv)?;
    let key = symmetric_key(&shared_x, &shared_y);

    Ok(Opened {
        plaintext: xor_block(&sealed.ciphertext, &key),
        symmetric_key: key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000;
    const RECIPIENT_PRIV: u64 = 0x5eed_1234;
    const EPHEMERAL_PRIV: u64 = 0x0e0e_0e0e;
    const PIN: u32 = 654_321;

    fn scalar(n: u64) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[24..].copy_from_slice(&n.to_be_bytes());
        out
    }

    fn secret() -> [u8; 32] {
        let mut data = [0u8; 32];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = i as u8 * 7 + 3;
        }
        data
    }

    fn owner() -> Pubkey {
        Pubkey::new_from_array([1u8; 32])
    }

    fn backup() -> Pubkey {
        Pubkey::new_from_array([2u8; 32])
    }

    fn credentials(caller: Pubkey, pin: u32) -> Credentials {
        Credentials {
            caller,
            owner: owner(),
            backup_wallet: backup(),
            pin,
            pin_hash: pin_hash(PIN),
        }
    }

    fn sealed_secret() -> Ciphertext {
        let (x, y) = ec::mul_generator(&scalar(RECIPIENT_PRIV)).unwrap();
        seal(&secret(), &x, &y, &scalar(EPHEMERAL_PRIV), T0).unwrap()
    }

    #[test]
    fn round_trip_recovers_data() {
        let sealed = sealed_secret();
        assert_ne!(sealed.ciphertext, secret());
        assert_eq!(sealed.created_at, T0);

        let opened = open(&sealed, &scalar(RECIPIENT_PRIV), &credentials(owner(), PIN), T0 + 60)
            .unwrap();
        assert_eq!(opened.plaintext, secret());
    }

    #[test]
    fn backup_wallet_may_open() {
        let sealed = sealed_secret();
        let opened =
            open(&sealed, &scalar(RECIPIENT_PRIV), &credentials(backup(), PIN), T0).unwrap();
        assert_eq!(opened.plaintext, secret());
    }

    #[test]
    fn stranger_is_rejected() {
        let sealed = sealed_secret();
        let stranger = Pubkey::new_from_array([9u8; 32]);
        let err = open(&sealed, &scalar(RECIPIENT_PRIV), &credentials(stranger, PIN), T0)
            .unwrap_err();
        assert_eq!(err, EciesError::Unauthorized.into());
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let sealed = sealed_secret();
        let creds = credentials(owner(), PIN);
        let at_deadline = T0 + DECRYPT_WINDOW_SECONDS;

        assert!(open(&sealed, &scalar(RECIPIENT_PRIV), &creds, at_deadline).is_ok());
        let err = open(&sealed, &scalar(RECIPIENT_PRIV), &creds, at_deadline + 1).unwrap_err();
        assert_eq!(err, EciesError::DecryptWindowExpired.into());
    }

    #[test]
    fn pin_checks_run_before_mac() {
        let mut sealed = sealed_secret();
        sealed.mac[0] ^= 0xff;

        let err = open(&sealed, &scalar(RECIPIENT_PRIV), &credentials(owner(), 1_000_000), T0)
            .unwrap_err();
        assert_eq!(err, EciesError::InvalidPin.into());

        let err = open(&sealed, &scalar(RECIPIENT_PRIV), &credentials(owner(), 123_456), T0)
            .unwrap_err();
        assert_eq!(err, EciesError::PinMismatch.into());
    }

    #[test]
    fn single_bit_tampering_fails_mac() {
        let creds = credentials(owner(), PIN);
        let original = sealed_secret();

        for bit in [0usize, 77, 255] {
            let mut tampered = original;
            tampered.ciphertext[bit / 8] ^= 1 << (bit % 8);
            let err = open(&tampered, &scalar(RECIPIENT_PRIV), &creds, T0).unwrap_err();
            assert_eq!(err, EciesError::MacMismatch.into());
        }

        let mut tampered = original;
        tampered.ephemeral_pub_x[31] ^= 1;
        let err = open(&tampered, &scalar(RECIPIENT_PRIV), &creds, T0).unwrap_err();
        assert_eq!(err, EciesError::MacMismatch.into());

        let mut tampered = original;
        tampered.ephemeral_pub_y[0] ^= 0x80;
        let err = open(&tampered, &scalar(RECIPIENT_PRIV), &creds, T0).unwrap_err();
        assert_eq!(err, EciesError::MacMismatch.into());
    }

    #[test]
    fn wrong_private_key_opens_to_garbage() {
        let sealed = sealed_secret();
        let opened =
            open(&sealed, &scalar(RECIPIENT_PRIV + 1), &credentials(owner(), PIN), T0).unwrap();
        assert_ne!(opened.plaintext, secret());
    }

    #[test]
    fn zero_coordinate_is_rejected() {
        let (x, _) = ec::mul_generator(&scalar(RECIPIENT_PRIV)).unwrap();
        let err = seal(&secret(), &x, &[0u8; 32], &scalar(EPHEMERAL_PRIV), T0).unwrap_err();
        assert_eq!(err, EciesError::InvalidPublicKey.into());
    }

    #[test]
    fn zero_ephemeral_key_is_fatal() {
        let (x, y) = ec::mul_generator(&scalar(RECIPIENT_PRIV)).unwrap();
        let err = seal(&secret(), &x, &y, &[0u8; 32], T0).unwrap_err();
        assert_eq!(err, EciesError::DegeneratePoint.into());
    }
}
