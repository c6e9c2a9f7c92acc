//! End-to-end scenarios exercising the public API against real temp files,
//! covering the seed scenarios in spec.md §8.

use std::io::Cursor;

use steganographer::bitops::Endian;
use steganographer::capacity;
use steganographer::container::{self, WAV_HEADER_LEN};
use steganographer::frame::{self, DecodeOutcome};
use steganographer::fragment::{multi_decode, multi_encode, MultiDecodeEntry, MultiEncodeEntry};
use steganographer::{Error, StegOptions};
use tempfile::tempdir;

#[test]
fn large_payload_round_trips_exactly_and_matches_capacity_formula() {
    let opts = StegOptions::new(0, 16, 64, 0, Endian::Big, 8, Vec::new()).unwrap();

    let payload: Vec<u8> = (0..1_000_000u32).map(|i| (i % 251) as u8).collect();
    let validation = capacity::validate(&opts, payload.len() as u64, u64::MAX).unwrap();
    let cover = vec![0x11u8; validation.total_bytes_required as usize];

    let mut stego = Vec::new();
    frame::encode(
        Cursor::new(&cover),
        cover.len() as u64,
        Cursor::new(&payload),
        payload.len() as u64,
        &mut stego,
        &opts,
    )
    .unwrap();

    assert_eq!(stego.len(), cover.len());

    let mut recovered = Vec::new();
    let outcome = frame::decode(Cursor::new(&stego), &mut recovered, &opts).unwrap();
    assert_eq!(outcome, DecodeOutcome::DecodingSuccessful);
    assert_eq!(recovered, payload);
}

#[test]
fn multi_fragment_round_trip_across_three_cover_files() {
    let dir = tempdir().unwrap();
    let payload: Vec<u8> = (0..27u8).map(|i| b'a' + i).collect();
    let sizes = [5u64, 12, 10];
    let options = StegOptions::default();

    let mut encode_entries = Vec::new();
    for (i, &size) in sizes.iter().enumerate() {
        let cover_path = dir.path().join(format!("cover{}.bin", i));
        std::fs::write(&cover_path, vec![0x00u8; 2048]).unwrap();
        encode_entries.push(MultiEncodeEntry {
            cover_path,
            destination_path: dir.path().join(format!("stego{}.bin", i)),
            data_amount_to_encode: size,
            options: options.clone(),
        });
    }

    multi_encode(&encode_entries, &payload).unwrap();

    let decode_entries: Vec<MultiDecodeEntry> = encode_entries
        .iter()
        .map(|e| MultiDecodeEntry {
            encoded_path: e.destination_path.clone(),
            options: e.options.clone(),
        })
        .collect();

    let mut recovered = Vec::new();
    let outcome = multi_decode(&decode_entries, &mut recovered).unwrap();
    assert_eq!(outcome, DecodeOutcome::DecodingSuccessful);
    assert_eq!(recovered, payload);
}

#[test]
fn capacity_boundary_succeeds_exactly_and_fails_one_byte_over() {
    let options = StegOptions::default();
    let payload = vec![0xAAu8; 50];

    let required = capacity::validate(&options, payload.len() as u64, u64::MAX)
        .unwrap()
        .total_bytes_required;

    let exact_cover = vec![0u8; required as usize];
    let mut stego = Vec::new();
    frame::encode(
        Cursor::new(&exact_cover),
        exact_cover.len() as u64,
        Cursor::new(&payload),
        payload.len() as u64,
        &mut stego,
        &options,
    )
    .unwrap();

    let short_payload = vec![0xAAu8; 51];
    let err = frame::encode(
        Cursor::new(&exact_cover),
        exact_cover.len() as u64,
        Cursor::new(&short_payload),
        short_payload.len() as u64,
        Vec::new(),
        &options,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InsufficientCapacity { .. }));
}

#[test]
fn capacity_boundary_succeeds_exactly_and_fails_one_byte_over_with_a_password() {
    let options = StegOptions::new(0, 0, 1, 0, Endian::Big, 0, b"A".to_vec()).unwrap();
    let payload = vec![0x7Bu8; 1];

    let required = capacity::validate(&options, payload.len() as u64, u64::MAX)
        .unwrap()
        .total_bytes_required;

    let exact_cover = vec![0u8; required as usize];
    let mut stego = Vec::new();
    frame::encode(
        Cursor::new(&exact_cover),
        exact_cover.len() as u64,
        Cursor::new(&payload),
        payload.len() as u64,
        &mut stego,
        &options,
    )
    .unwrap();

    let one_byte_short_cover = vec![0u8; required as usize - 1];
    let err = frame::encode(
        Cursor::new(&one_byte_short_cover),
        one_byte_short_cover.len() as u64,
        Cursor::new(&payload),
        payload.len() as u64,
        Vec::new(),
        &options,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InsufficientCapacity { .. }));
}

#[test]
fn password_discrimination_distinguishes_wrong_password_and_presence_mismatch() {
    let cover = vec![0x42u8; 512];
    let payload = b"ABC".to_vec();
    let mut options = StegOptions::new(7, 2, 3, 0, Endian::Big, 1, b"ABC".to_vec()).unwrap();

    let mut stego = Vec::new();
    frame::encode(
        Cursor::new(&cover),
        cover.len() as u64,
        Cursor::new(&payload),
        payload.len() as u64,
        &mut stego,
        &options,
    )
    .unwrap();

    let mut recovered = Vec::new();
    assert_eq!(
        frame::decode(Cursor::new(&stego), &mut recovered, &options).unwrap(),
        DecodeOutcome::DecodingSuccessful
    );
    assert_eq!(recovered, payload);

    options.set_password(b"XYZ".to_vec());
    let mut garbage = Vec::new();
    assert_eq!(
        frame::decode(Cursor::new(&stego), &mut garbage, &options).unwrap(),
        DecodeOutcome::InvalidPassword
    );

    options.set_password(Vec::new());
    let mut garbage2 = Vec::new();
    assert_eq!(
        frame::decode(Cursor::new(&stego), &mut garbage2, &options).unwrap(),
        DecodeOutcome::InvalidPassword
    );
}

#[test]
fn prefix_and_suffix_bytes_are_invariant() {
    let options = StegOptions::new(20, 3, 5, 2, Endian::Little, 4, b"pw".to_vec()).unwrap();
    let payload = b"invariance check".to_vec();

    let validation = capacity::validate(&options, payload.len() as u64, u64::MAX).unwrap();
    let mut cover = vec![0x5Cu8; validation.total_bytes_required as usize + 64];
    // mark the prefix and tail regions distinctly so any accidental overwrite shows up
    for (i, b) in cover.iter_mut().enumerate().take(20) {
        *b = 0xA0 | (i as u8 & 0x0F);
    }
    for i in cover.len() - 30..cover.len() {
        cover[i] = 0xD7;
    }

    let mut stego = Vec::new();
    frame::encode(
        Cursor::new(&cover),
        cover.len() as u64,
        Cursor::new(&payload),
        payload.len() as u64,
        &mut stego,
        &options,
    )
    .unwrap();

    assert_eq!(stego.len(), cover.len());
    assert_eq!(&stego[..20], &cover[..20], "initial_offset prefix must be untouched");
    assert_eq!(
        &stego[stego.len() - 30..],
        &cover[cover.len() - 30..],
        "bytes beyond the hidden frame must be bit-identical to the cover"
    );
}

#[test]
fn flipping_a_bit_outside_hidden_bit_position_does_not_affect_decode() {
    let cover = vec![0u8; 300];
    let options = StegOptions::new(0, 1, 2, 3, Endian::Big, 0, Vec::new()).unwrap();
    let payload = b"xy".to_vec();

    let mut stego = Vec::new();
    frame::encode(
        Cursor::new(&cover),
        cover.len() as u64,
        Cursor::new(&payload),
        payload.len() as u64,
        &mut stego,
        &options,
    )
    .unwrap();

    // flip every bit of every touched byte except hidden_bit_position (3) and the
    // fixed password-flag bit (0, carried by the very first frame byte)
    let mut tampered = stego.clone();
    let preserved_mask = (1u8 << 3) | 1u8;
    for b in tampered.iter_mut() {
        let carried = *b & preserved_mask;
        *b = !*b;
        *b = (*b & !preserved_mask) | carried;
    }

    let mut recovered = Vec::new();
    let outcome = frame::decode(Cursor::new(&tampered), &mut recovered, &options).unwrap();
    assert_eq!(outcome, DecodeOutcome::DecodingSuccessful);
    assert_eq!(recovered, payload);
}

#[test]
fn wav_adapter_preserves_header_across_a_full_round_trip() {
    let dir = tempdir().unwrap();
    let cover_path = dir.path().join("cover.wav");
    let dest_path = dir.path().join("stego.wav");

    let mut wav = vec![0u8; WAV_HEADER_LEN as usize];
    wav[0..4].copy_from_slice(b"RIFF");
    wav[8..12].copy_from_slice(b"WAVE");
    wav.extend(vec![0x99u8; 8192]);
    std::fs::write(&cover_path, &wav).unwrap();

    let payload = b"concealed audio payload".to_vec();
    let options = StegOptions::default();

    container::encode_wav(&cover_path, &payload, &dest_path, &options).unwrap();

    let stego_bytes = std::fs::read(&dest_path).unwrap();
    assert_eq!(stego_bytes.len(), wav.len());
    assert_eq!(&stego_bytes[..WAV_HEADER_LEN as usize], &wav[..WAV_HEADER_LEN as usize]);

    let (outcome, recovered) = container::decode_wav(&dest_path, &options).unwrap();
    assert_eq!(outcome, DecodeOutcome::DecodingSuccessful);
    assert_eq!(recovered, payload);
}
