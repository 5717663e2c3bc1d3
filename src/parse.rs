use crate::types::{Position, Trajectory};
use byteorder::{ByteOrder, LittleEndian};
use regex::Regex;
use std::path::Path;

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Everything that can go wrong while loading a trajectory file. All of it is
/// fatal: there is no partial load and no recovery, the caller reports the
/// error and aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read trajectory file: {0}")]
    Io(#[from] std::io::Error),

    #[error("not an npy file (bad magic)")]
    BadMagic,

    #[error("unsupported npy version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("malformed npy header: {0}")]
    BadHeader(String),

    #[error("unsupported dtype {0:?}, expected little-endian f4 or f8")]
    UnsupportedDtype(String),

    #[error("fortran-order arrays are not supported")]
    FortranOrder,

    #[error("expected shape (frames, markers, 3), got {0:?}")]
    BadShape(Vec<usize>),

    #[error("marker count mismatch: file has {found} markers, marker set has {expected}")]
    MarkerCountMismatch { expected: usize, found: usize },

    #[error("payload size mismatch: expected {expected} bytes, found {found}")]
    PayloadSize { expected: usize, found: usize },
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct NpyHeader {
    descr: String,
    fortran_order: bool,
    shape: Vec<usize>,
}

const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Split the raw file into the header dict text and the value payload.
/// Version 1.x stores the header length as u16, 2.x/3.x as u32.
fn __split_header(bytes: &[u8]) -> Result<(&str, &[u8]), LoadError> {
    if bytes.len() < MAGIC.len() + 2 || &bytes[..MAGIC.len()] != MAGIC {
        return Err(LoadError::BadMagic);
    }
    let major = bytes[6];
    let minor = bytes[7];
    let (header_len, header_start) = match major {
        1 => {
            if bytes.len() < 10 {
                return Err(LoadError::BadHeader("file ends before header length".to_string()));
            }
            (LittleEndian::read_u16(&bytes[8..10]) as usize, 10)
        }
        2 | 3 => {
            if bytes.len() < 12 {
                return Err(LoadError::BadHeader("file ends before header length".to_string()));
            }
            (LittleEndian::read_u32(&bytes[8..12]) as usize, 12)
        }
        _ => return Err(LoadError::UnsupportedVersion { major, minor }),
    };
    let header_end = header_start + header_len;
    if bytes.len() < header_end {
        return Err(LoadError::BadHeader(
            "declared header length runs past end of file".to_string(),
        ));
    }
    let header = std::str::from_utf8(&bytes[header_start..header_end])
        .map_err(|_| LoadError::BadHeader("header is not valid UTF-8".to_string()))?;
    Ok((header, &bytes[header_end..]))
}

/// Pull descr / fortran_order / shape out of the python dict literal, e.g.
/// `{'descr': '<f8', 'fortran_order': False, 'shape': (250, 19, 3), }`.
fn __parse_header(header: &str) -> Result<NpyHeader, LoadError> {
    let re_descr = Regex::new(r"'descr':\s*'([^']+)'").unwrap();
    let re_fortran = Regex::new(r"'fortran_order':\s*(True|False)").unwrap();
    let re_shape = Regex::new(r"'shape':\s*\(([^)]*)\)").unwrap();

    let descr = re_descr
        .captures(header)
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| LoadError::BadHeader("missing 'descr' entry".to_string()))?
        .as_str()
        .to_string();

    let fortran_order = re_fortran
        .captures(header)
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| LoadError::BadHeader("missing 'fortran_order' entry".to_string()))?
        .as_str()
        == "True";

    let shape_list = re_shape
        .captures(header)
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| LoadError::BadHeader("missing 'shape' entry".to_string()))?
        .as_str();

    //// parse the tuple entries, tolerating the trailing comma of 1-tuples
    let shape = shape_list
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<usize>()
                .map_err(|_| LoadError::BadHeader(format!("bad shape entry {entry:?}")))
        })
        .collect::<Result<Vec<usize>, LoadError>>()?;

    Ok(NpyHeader {
        descr,
        fortran_order,
        shape,
    })
}

/// Decode the raw little-endian payload into positions, widening f4 to f64.
fn __read_positions(payload: &[u8], count: usize, item_size: usize) -> Vec<Position> {
    let mut values = vec![0.0f64; count];
    if item_size == 8 {
        LittleEndian::read_f64_into(payload, &mut values);
    } else {
        let mut singles = vec![0.0f32; count];
        LittleEndian::read_f32_into(payload, &mut singles);
        for (value, single) in values.iter_mut().zip(&singles) {
            *value = f64::from(*single);
        }
    }
    values
        .chunks_exact(3)
        .map(|triple| Position::new(triple[0], triple[1], triple[2]))
        .collect()
}

//////////////////////////////////////////////////////////////// PUBLIC ///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Load a marker trajectory from an `.npy` file on disk.
///
/// The array must have shape `(frames, markers, 3)` in C order with exactly
/// `expected_markers` markers; marker order is positional, matching the
/// marker table's declared order. There is no further header or versioning of
/// the marker layout inside the file.
pub fn load_trajectory_from_file(
    path: impl AsRef<Path>,
    expected_markers: usize,
) -> Result<Trajectory, LoadError> {
    let bytes = std::fs::read(path)?;
    load_trajectory_from_bytes(&bytes, expected_markers)
}

/// Load a marker trajectory from an in-memory `.npy` buffer.
pub fn load_trajectory_from_bytes(
    bytes: &[u8],
    expected_markers: usize,
) -> Result<Trajectory, LoadError> {
    let (raw_header, payload) = __split_header(bytes)?;
    let header = __parse_header(raw_header)?;

    if header.fortran_order {
        return Err(LoadError::FortranOrder);
    }
    let item_size = match header.descr.as_str() {
        "<f8" => 8,
        "<f4" => 4,
        _ => return Err(LoadError::UnsupportedDtype(header.descr)),
    };
    let (num_frames, num_markers) = match header.shape[..] {
        [frames, markers, 3] => (frames, markers),
        _ => return Err(LoadError::BadShape(header.shape)),
    };
    if num_markers != expected_markers {
        return Err(LoadError::MarkerCountMismatch {
            expected: expected_markers,
            found: num_markers,
        });
    }

    let count = num_frames * num_markers * 3;
    let expected_bytes = count * item_size;
    if payload.len() != expected_bytes {
        return Err(LoadError::PayloadSize {
            expected: expected_bytes,
            found: payload.len(),
        });
    }

    let positions = __read_positions(payload, count, item_size);
    tracing::debug!(
        frames = num_frames,
        markers = num_markers,
        dtype = item_size * 8,
        "trajectory decoded"
    );
    Ok(Trajectory::new(num_frames, num_markers, positions))
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
