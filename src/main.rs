extern crate structopt;

use std::fs::{File, OpenOptions};
use std::io::{stdout, Read, Write};
use std::path::{Path, PathBuf};

use structopt::StructOpt;

use cli::{CodecArgs, ContainerArg, EndianArg, Opt};
use steganographer::bitops::Endian;
use steganographer::container;
use steganographer::frame::DecodeOutcome;
use steganographer::fragment::{multi_decode, multi_encode, MultiDecodeEntry, MultiEncodeEntry};
use steganographer::{decode_from_file, encode_into_file, Error, StegOptions};

mod cli;

fn build_options(codec: &CodecArgs) -> Result<StegOptions, Error> {
    let endian = match codec.endian {
        EndianArg::Big => Endian::Big,
        EndianArg::Little => Endian::Little,
    };
    StegOptions::new(
        codec.offset,
        codec.skip,
        codec.block_size,
        codec.bit_position,
        endian,
        codec.flip_frequency,
        codec.password.clone().into_bytes(),
    )
}

fn read_payload_file(path: &Path) -> Result<Vec<u8>, Error> {
    let mut file = File::open(path)?;
    let mut buf = Vec::with_capacity(file.metadata()?.len() as usize);
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

fn check_destination(path: &Path, force: bool) -> Result<(), Error> {
    if !force && path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists; pass --force to replace", path.display()),
        )));
    }
    Ok(())
}

fn write_output(data: Option<PathBuf>, bytes: Vec<u8>, force: bool) -> Result<(), Error> {
    match data {
        Some(path) => {
            check_destination(&path, force)?;
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(path)?
                .write_all(&bytes)?
        }
        None => stdout().write_all(&bytes)?,
    }
    Ok(())
}

fn warn_if_invalid_password(outcome: DecodeOutcome) {
    if outcome == DecodeOutcome::InvalidPassword {
        log::warn!("decoded stego file did not match the supplied password");
    }
}

fn parse_multi_encode_entry(spec: &str, options: &StegOptions) -> Result<MultiEncodeEntry, Error> {
    let parts: Vec<&str> = spec.splitn(3, ':').collect();
    match parts.as_slice() {
        [cover, dest, amount] => {
            let data_amount_to_encode = amount.parse::<u64>().map_err(|e| {
                Error::InvalidArgument(format!("invalid amount '{}' in entry '{}': {}", amount, spec, e))
            })?;
            Ok(MultiEncodeEntry {
                cover_path: PathBuf::from(cover),
                destination_path: PathBuf::from(dest),
                data_amount_to_encode,
                options: options.clone(),
            })
        }
        _ => Err(Error::InvalidArgument(format!(
            "expected 'cover:destination:amount', got '{}'",
            spec
        ))),
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    match Opt::from_args() {
        Opt::Encode { cover, data, result, force, codec } => {
            let options = build_options(&codec)?;
            check_destination(&result, force)?;
            match codec.container {
                ContainerArg::Raw => encode_into_file(cover, Some(data), result, true, &options),
                ContainerArg::Wav => {
                    let payload = read_payload_file(&data)?;
                    container::encode_wav(&cover, &payload, &result, &options)?;
                    Ok(())
                }
                ContainerArg::Png => {
                    let payload = read_payload_file(&data)?;
                    container::encode_png(&cover, &payload, &result, &options)?;
                    Ok(())
                }
            }
        }
        Opt::Decode { encoded, data, force, codec } => {
            let options = build_options(&codec)?;
            match codec.container {
                ContainerArg::Raw => decode_from_file(encoded, data, force, &options),
                ContainerArg::Wav => {
                    let (outcome, recovered) = container::decode_wav(&encoded, &options)?;
                    warn_if_invalid_password(outcome);
                    write_output(data, recovered, force)
                }
                ContainerArg::Png => {
                    let (outcome, recovered) = container::decode_png(&encoded, &options)?;
                    warn_if_invalid_password(outcome);
                    write_output(data, recovered, force)
                }
            }
        }
        Opt::MultiEncode { data, entries, codec } => {
            let options = build_options(&codec)?;
            let payload = read_payload_file(&data)?;
            let parsed: Vec<MultiEncodeEntry> = entries
                .iter()
                .map(|e| parse_multi_encode_entry(e, &options))
                .collect::<Result<_, Error>>()?;
            multi_encode(&parsed, &payload)?;
            Ok(())
        }
        Opt::MultiDecode { result, entries, codec } => {
            let options = build_options(&codec)?;
            let parsed: Vec<MultiDecodeEntry> = entries
                .into_iter()
                .map(|encoded_path| MultiDecodeEntry {
                    encoded_path,
                    options: options.clone(),
                })
                .collect();
            let mut recovered = Vec::new();
            let outcome = multi_decode(&parsed, &mut recovered)?;
            warn_if_invalid_password(outcome);
            write_output(Some(result), recovered, true)
        }
    }
}
