//! Builds 8-bit gamma lookup tables and writes them out as C array
//! declarations or CSV, for embedding in firmware.

mod error;
pub mod gamma;

use std::io::Write;

pub use error::Error;
pub use gamma::{build_gamma_table, GammaTable, TABLE_LEN};

/// Values per row in the array declaration.
const VALUES_PER_LINE: usize = 16;

pub fn write_c_array<W: Write>(
    out: &mut W,
    table: &[u8],
    name: &str,
    progmem: bool,
    helper: bool,
) -> Result<(), Error> {
    check_len(table)?;

    let qualifier = if progmem {
        "const uint8_t PROGMEM "
    } else {
        "const uint8_t "
    };
    out.write_all(format!("{}{}[{}] = {{\n", qualifier, name, TABLE_LEN).as_bytes())?;
    for row in table.chunks(VALUES_PER_LINE) {
        let values: Vec<String> = row.iter().map(|v| format!("{:3}", v)).collect();
        out.write_all(format!("    {},\n", values.join(", ")).as_bytes())?;
    }
    out.write_all(b"};")?;

    if helper {
        // PROGMEM data isn't in the data address space on AVR, so it can
        // only be read through `pgm_read_byte()`.
        let read = if progmem {
            format!("pgm_read_byte(&{}[v])", name)
        } else {
            format!("{}[v]", name)
        };
        out.write_all(b"\n\n")?;
        out.write_all(format!("static inline uint8_t {}_read(uint8_t v) {{\n", name).as_bytes())?;
        out.write_all(format!("    return {};\n", read).as_bytes())?;
        out.write_all(b"}")?;
    }

    Ok(())
}

pub fn write_csv<W: Write>(out: &mut W, table: &[u8]) -> Result<(), Error> {
    check_len(table)?;

    let values: Vec<String> = table.iter().map(|v| v.to_string()).collect();
    out.write_all(values.join(",").as_bytes())?;

    Ok(())
}

/// Renders `table` as a read-only `uint8_t` array named `name`, with an
/// optional `<name>_read()` accessor.  No trailing newline.
pub fn emit_c_array(table: &[u8], name: &str, progmem: bool, helper: bool) -> Result<String, Error> {
    let mut buf = Vec::new();
    write_c_array(&mut buf, table, name, progmem, helper)?;
    into_string(buf)
}

/// Renders `table` as a single line of comma-separated values.  No
/// trailing newline.
pub fn emit_csv(table: &[u8]) -> Result<String, Error> {
    let mut buf = Vec::new();
    write_csv(&mut buf, table)?;
    into_string(buf)
}

fn check_len(table: &[u8]) -> Result<(), Error> {
    if table.len() != TABLE_LEN {
        return Err(Error::InvalidParameter(format!(
            "table must have exactly {} entries (got {})",
            TABLE_LEN,
            table.len()
        )));
    }
    Ok(())
}

// The writers only ever emit ASCII plus the caller's `&str` name, so this
// can't fail in practice; the error arm just keeps the types honest.
fn into_string(buf: Vec<u8>) -> Result<String, Error> {
    String::from_utf8(buf)
        .map_err(|e| Error::IO(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_2_2() -> GammaTable {
        build_gamma_table(2.2).unwrap()
    }

    #[test]
    fn c_array_layout() {
        let text = emit_c_array(&table_2_2(), "gamma8", false, false).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 18);
        assert_eq!(lines[0], "const uint8_t gamma8[256] = {");
        assert_eq!(
            lines[1],
            "      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   1,"
        );
        assert_eq!(
            lines[16],
            "    223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253, 255,"
        );
        assert_eq!(lines[17], "};");
        assert!(!text.ends_with('\n'));
        assert!(!text.contains("PROGMEM"));
        assert!(!text.contains("_read"));
    }

    #[test]
    fn c_array_rows_hold_table_values() {
        let table = table_2_2();
        let text = emit_c_array(&table, "gamma8", false, false).unwrap();
        let values: Vec<u8> = text
            .lines()
            .skip(1)
            .take(16)
            .flat_map(|line| {
                assert!(line.starts_with("    ") && line.ends_with(','));
                line.split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| s.trim().parse::<u8>().unwrap())
                    .collect::<Vec<_>>()
            })
            .collect();
        assert_eq!(&values[..], &table[..]);
    }

    #[test]
    fn c_array_progmem() {
        let text = emit_c_array(&table_2_2(), "gamma8", true, false).unwrap();
        assert!(text.starts_with("const uint8_t PROGMEM gamma8[256] = {\n"));
        assert!(!text.contains("pgm_read_byte"));
    }

    #[test]
    fn c_array_helper_direct_read() {
        let text = emit_c_array(&table_2_2(), "led", false, true).unwrap();
        assert!(text.starts_with("const uint8_t led[256] = {\n"));
        assert!(text.ends_with(
            "};\n\nstatic inline uint8_t led_read(uint8_t v) {\n    return led[v];\n}"
        ));
        assert!(!text.contains("pgm_read_byte"));
    }

    #[test]
    fn c_array_helper_progmem_read() {
        let text = emit_c_array(&table_2_2(), "led", true, true).unwrap();
        assert!(text.starts_with("const uint8_t PROGMEM led[256] = {\n"));
        assert!(text.contains("static inline uint8_t led_read(uint8_t v) {\n"));
        assert!(text.contains("    return pgm_read_byte(&led[v]);\n"));
        assert!(!text.contains("return led[v]"));
    }

    #[test]
    fn c_array_is_deterministic() {
        let table = table_2_2();
        let a = emit_c_array(&table, "led", true, true).unwrap();
        let b = emit_c_array(&table, "led", true, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn csv_round_trip() {
        let table = table_2_2();
        let text = emit_csv(&table).unwrap();
        assert!(!text.contains('\n'));
        assert!(!text.ends_with(','));

        let values: Vec<u8> = text.split(',').map(|s| s.parse().unwrap()).collect();
        assert_eq!(values.len(), 256);
        assert_eq!(&values[..], &table[..]);
    }

    #[test]
    fn csv_identity_prefix() {
        let text = emit_csv(&build_gamma_table(1.0).unwrap()).unwrap();
        assert!(text.starts_with("0,1,2,3,"));
        assert!(text.ends_with(",254,255"));
    }

    #[test]
    fn wrong_length_rejected() {
        let short = [0u8; 255];
        let long = [0u8; 257];
        for table in &[&short[..], &long[..], &[0u8; 0][..]] {
            match emit_c_array(table, "gamma8", false, false) {
                Err(Error::InvalidParameter(_)) => {}
                r => panic!("expected InvalidParameter, got {:?}", r),
            }
            match emit_csv(table) {
                Err(Error::InvalidParameter(_)) => {}
                r => panic!("expected InvalidParameter, got {:?}", r),
            }
        }
    }

    #[test]
    fn c_array_keeps_name_bytes() {
        let text = emit_c_array(&table_2_2(), "lüt", false, true).unwrap();
        assert!(text.starts_with("const uint8_t lüt[256] = {\n"));
        assert!(text.contains("static inline uint8_t lüt_read(uint8_t v) {\n"));
    }

    #[test]
    fn writer_leaves_nothing_on_bad_length() {
        let mut buf = Vec::new();
        assert!(write_c_array(&mut buf, &[1, 2, 3], "x", true, true).is_err());
        assert!(buf.is_empty());
    }
}
