//! Domain name codec, RFC 1035 section 3.1 and 4.1.4.
//!
//! Names are handled as printable ASCII; every label byte maps to exactly one
//! `char` and back.

use crate::error::{Error, Result};
use crate::utils::Reader;

pub const MAX_LABEL_LENGTH: usize = 63;
pub const MAX_NAME_LENGTH: usize = 255;

/// Upper bound on labels plus pointer jumps while decoding a single name.
pub const MAX_DECODE_STEPS: usize = 512;

const POINTER_MASK: u8 = 0xC0;

/// Converts `www.example.com` into length-prefixed labels ending with a zero octet.
pub fn domain_to_qname(domain: &str) -> Result<Vec<u8>> {
    let mut qname: Vec<u8> = Vec::with_capacity(domain.len() + 2);

    for (position, label) in domain.split('.').enumerate() {
        let length = label.len();
        if length == 0 {
            return Err(Error::EmptyLabel { position });
        }
        if length > MAX_LABEL_LENGTH {
            return Err(Error::LabelTooLong {
                label: label.to_string(),
                length,
            });
        }

        // this label, its length octet and the terminator still to come
        let total = qname.len() + 1 + length + 1;
        if total > MAX_NAME_LENGTH {
            return Err(Error::NameTooLong { length: total });
        }

        qname.push(length as u8);
        qname.extend_from_slice(label.as_bytes());
    }

    qname.push(0);

    Ok(qname)
}

/// Decodes the name starting at `offset` in `message`.
///
/// Returns the dotted name and the offset right after it in the original byte
/// stream. Once a compression pointer has been followed that offset stays fixed
/// just after the first pointer, however many more jumps follow.
pub fn qname_to_domain(message: &[u8], offset: usize) -> Result<(String, usize)> {
    let mut labels: Vec<String> = Vec::new();
    let mut pos = offset;
    let mut resume: Option<usize> = None;

    for _ in 0..MAX_DECODE_STEPS {
        let len_byte = *message
            .get(pos)
            .ok_or(Error::UnexpectedEof { offset: pos })?;

        match len_byte & POINTER_MASK {
            POINTER_MASK => {
                let low = *message
                    .get(pos + 1)
                    .ok_or(Error::UnexpectedEof { offset: pos + 1 })?;
                let target = u16::from_be_bytes([len_byte & !POINTER_MASK, low]) as usize;

                if resume.is_none() {
                    resume = Some(pos + 2);
                }
                pos = target;
            }
            0x00 => {
                let length = len_byte as usize;
                if length == 0 {
                    return Ok((labels.join("."), resume.unwrap_or(pos + 1)));
                }

                let start = pos + 1;
                let end = start + length;
                let bytes = message
                    .get(start..end)
                    .ok_or(Error::UnexpectedEof {
                        offset: message.len(),
                    })?;
                labels.push(bytes.iter().map(|b| char::from(*b)).collect());

                pos = end;
            }
            // 0x40 and 0x80 prefixes are reserved label types
            _ => {
                return Err(Error::InvalidLabelType {
                    offset: pos,
                    byte: len_byte,
                })
            }
        }
    }

    Err(Error::CompressionLoop { offset })
}

/// Decodes the name at the cursor and moves the cursor past it.
pub fn read_name(rdr: &mut Reader) -> Result<String> {
    let (name, next) = qname_to_domain(rdr.get_ref(), rdr.position() as usize)?;
    rdr.set_position(next as u64);

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_labels() {
        let qname = domain_to_qname("baidu.com").unwrap();
        assert_eq!(
            qname,
            vec![5, 98, 97, 105, 100, 117, 3, 99, 111, 109, 0]
        );
    }

    #[test]
    fn round_trip_without_compression() {
        let names = [
            "a",
            "www.mcgill.ca",
            "example.com",
            "x-1.y_2.z3.test",
        ];
        for name in names.iter() {
            let qname = domain_to_qname(name).unwrap();
            let (decoded, next) = qname_to_domain(&qname, 0).unwrap();
            assert_eq!(&decoded, name);
            assert_eq!(next, qname.len());
        }
    }

    #[test]
    fn rejects_empty_labels() {
        assert_eq!(domain_to_qname(""), Err(Error::EmptyLabel { position: 0 }));
        assert_eq!(
            domain_to_qname("www..com"),
            Err(Error::EmptyLabel { position: 1 })
        );
        assert_eq!(
            domain_to_qname("example.com."),
            Err(Error::EmptyLabel { position: 2 })
        );
    }

    #[test]
    fn label_length_limit() {
        let ok = "a".repeat(63);
        assert!(domain_to_qname(&format!("{}.com", ok)).is_ok());

        let long = "a".repeat(64);
        let err = domain_to_qname(&format!("{}.com", long)).unwrap_err();
        assert_eq!(
            err,
            Error::LabelTooLong {
                label: long,
                length: 64
            }
        );
        assert!(err.to_string().contains("63"));
        assert!(err.to_string().starts_with("invalid label length"));
    }

    #[test]
    fn name_length_limit() {
        // four 62-byte labels: 4 * 63 + 1 = 253 bytes on the wire
        let label = "b".repeat(62);
        let fits = vec![label.as_str(); 4].join(".");
        assert_eq!(domain_to_qname(&fits).unwrap().len(), 253);

        // one more 1-byte label lands exactly on 255
        let exact = format!("{}.c", fits);
        assert_eq!(domain_to_qname(&exact).unwrap().len(), 255);

        let over = format!("{}.cd", fits);
        let err = domain_to_qname(&over).unwrap_err();
        assert_eq!(err, Error::NameTooLong { length: 256 });
        assert!(err.to_string().contains("255"));
        assert!(err.to_string().starts_with("name too long"));

        // sixty 5-byte labels: 60 * 6 + 1 = 361 bytes
        let many = vec!["abcde"; 60].join(".");
        let err = domain_to_qname(&many).unwrap_err();
        assert!(err.to_string().contains("name too long"));
    }

    #[test]
    fn pointer_resume_offset_is_after_first_pointer() {
        // 0: "example.com", 13: "www" + pointer to 0, 19: pointer to 13
        let mut msg = domain_to_qname("example.com").unwrap();
        msg.extend_from_slice(&[3, b'w', b'w', b'w', 0xC0, 0x00]);
        msg.extend_from_slice(&[0xC0, 13]);

        let (name, next) = qname_to_domain(&msg, 13).unwrap();
        assert_eq!(name, "www.example.com");
        assert_eq!(next, 19);

        let (name, next) = qname_to_domain(&msg, 19).unwrap();
        assert_eq!(name, "www.example.com");
        assert_eq!(next, 21);
    }

    #[test]
    fn pointer_matches_uncompressed_name() {
        let mut msg = vec![0u8; 12];
        msg.extend(domain_to_qname("mail.example.org").unwrap());
        let pointer_at = msg.len();
        // "smtp" followed by a pointer to "example.org" inside the first name
        msg.extend_from_slice(&[4, b's', b'm', b't', b'p', 0xC0, 17]);

        let plain = domain_to_qname("smtp.example.org").unwrap();
        let (expected, _) = qname_to_domain(&plain, 0).unwrap();
        let (compressed, next) = qname_to_domain(&msg, pointer_at).unwrap();
        assert_eq!(compressed, expected);
        assert_eq!(next, msg.len());
    }

    #[test]
    fn detects_pointer_loop() {
        // two pointers pointing at each other
        let msg = [0xC0, 0x02, 0xC0, 0x00];
        assert_eq!(
            qname_to_domain(&msg, 0),
            Err(Error::CompressionLoop { offset: 0 })
        );

        // a pointer to itself
        let msg = [0x01, b'a', 0xC0, 0x02];
        assert_eq!(
            qname_to_domain(&msg, 0),
            Err(Error::CompressionLoop { offset: 0 })
        );
    }

    #[test]
    fn truncated_input_is_malformed() {
        assert_eq!(
            qname_to_domain(&[3, b'c', b'o'], 0),
            Err(Error::UnexpectedEof { offset: 3 })
        );
        assert_eq!(
            qname_to_domain(&[3, b'c', b'o', b'm'], 0),
            Err(Error::UnexpectedEof { offset: 4 })
        );
        assert_eq!(
            qname_to_domain(&[0xC0], 0),
            Err(Error::UnexpectedEof { offset: 1 })
        );
        // pointer past the end of the message
        assert_eq!(
            qname_to_domain(&[0xC0, 0x40], 0),
            Err(Error::UnexpectedEof { offset: 0x40 })
        );
    }

    #[test]
    fn rejects_reserved_label_types() {
        assert_eq!(
            qname_to_domain(&[0x41, 0x00], 0),
            Err(Error::InvalidLabelType {
                offset: 0,
                byte: 0x41
            })
        );
    }

    #[test]
    fn read_name_advances_cursor() {
        let mut msg = domain_to_qname("a.b").unwrap();
        msg.extend_from_slice(&[0x00, 0x01]);
        let mut rdr = std::io::Cursor::new(&msg[..]);
        assert_eq!(read_name(&mut rdr).unwrap(), "a.b");
        assert_eq!(rdr.position(), 5);
    }
}
