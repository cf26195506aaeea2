use pz_token::{ImmediateType, ImmediateValue, Opcode, Token, VmConfig, Width};

use crate::error::EncodeError;
use crate::select::select_token;

/// Round `offset` up to the next multiple of `alignment` (`alignment` is
/// always a power of two: 1, 2, 4, 8, or the host word size).
#[inline]
fn align_up(offset: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    (offset + alignment - 1) & !(alignment - 1)
}

/// Encodes `(opcode, width1, width2, immediate)` tuples into a procedure's
/// byte buffer (spec.md §4.3).
///
/// Stateless beyond the [`VmConfig`] used for width normalization: a single
/// `Encoder` instance is reused across every instruction of every procedure
/// the assembler builds, mirroring the teacher's `BytecodeWriter` being a
/// thin wrapper the caller drives instruction-by-instruction.
pub struct Encoder {
    config: VmConfig,
}

impl Encoder {
    pub fn new(config: VmConfig) -> Self {
        Self { config }
    }

    /// Encode one instruction.
    ///
    /// `buffer` is `None` in measure mode: no bytes are written, but the
    /// returned offset is exactly what a subsequent real encode at the same
    /// `offset` would produce (spec.md §4.3's "Encoder measure equals
    /// write" invariant, tested end-to-end in `pz-vm`'s integration tests).
    /// When `Some`, `buffer.len()` must already equal `offset` — callers
    /// build a procedure by encoding instructions strictly in order.
    pub fn encode(
        &self,
        buffer: Option<&mut Vec<u8>>,
        offset: usize,
        opcode: Opcode,
        width1: Width,
        width2: Width,
        immediate_type: ImmediateType,
        immediate_value: ImmediateValue,
    ) -> Result<usize, EncodeError> {
        let w1 = width1.normalize(&self.config);
        let w2 = width2.normalize(&self.config);

        let selected = match select_token(opcode, w1, w2, immediate_type, immediate_value) {
            Ok(selected) => selected,
            Err(err) => {
                log::error!("pz-encode: {err}");
                return Err(err);
            }
        };

        let mut buffer = buffer;
        if let Some(buf) = buffer.as_deref_mut() {
            debug_assert_eq!(buf.len(), offset, "encoder must be driven in offset order");
            buf.push(selected.token as u8);
        }
        let mut new_offset = offset + 1;

        if let Some(immediate) = selected.immediate {
            new_offset =
                self.write_immediate(buffer.as_deref_mut(), new_offset, selected.token, immediate);
        }

        Ok(new_offset)
    }

    fn write_immediate(
        &self,
        buffer: Option<&mut Vec<u8>>,
        offset: usize,
        token: Token,
        value: ImmediateValue,
    ) -> usize {
        let size = token.immediate_size_in_bytes();
        let aligned = align_up(offset, size);

        if let Some(buf) = buffer {
            buf.resize(aligned, 0);
            match token {
                Token::LoadImmediate8 | Token::Roll | Token::Pick => {
                    buf.push(value.coerce_u8());
                }
                Token::LoadImmediate16 => buf.extend_from_slice(&value.coerce_u16().to_ne_bytes()),
                Token::LoadImmediate32 => buf.extend_from_slice(&value.coerce_u32().to_ne_bytes()),
                Token::LoadImmediate64 => buf.extend_from_slice(&value.coerce_u64().to_ne_bytes()),
                Token::LoadImmediateData
                | Token::Call
                | Token::CJmp8
                | Token::CJmp16
                | Token::CJmp32
                | Token::CJmp64
                | Token::CCall => {
                    buf.extend_from_slice(&value.as_host_word().to_ne_bytes());
                }
                _ => unreachable!("{token:?} does not carry an immediate"),
            }
        }

        aligned + size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encoder() -> Encoder {
        Encoder::new(VmConfig::default())
    }

    #[test]
    fn test_measure_mode_matches_write_mode() {
        let enc = encoder();
        let measured = enc
            .encode(
                None,
                3,
                Opcode::LoadImmediateNum,
                Width::W32,
                Width::W32,
                ImmediateType::I32,
                ImmediateValue::U32(42),
            )
            .unwrap();

        let mut buf = vec![0u8; 3];
        let written = enc
            .encode(
                Some(&mut buf),
                3,
                Opcode::LoadImmediateNum,
                Width::W32,
                Width::W32,
                ImmediateType::I32,
                ImmediateValue::U32(42),
            )
            .unwrap();

        assert_eq!(measured, written);
        assert_eq!(buf.len(), written);
    }

    #[test]
    fn test_immediate_is_aligned_from_buffer_start() {
        let enc = encoder();
        let mut buf = Vec::new();
        // opcode byte at 0, NOP at 1 (1 byte), then a LOAD_IMMEDIATE_32 at 2:
        // its immediate must land at offset 4 (next 4-byte boundary).
        let off = enc
            .encode(
                Some(&mut buf),
                0,
                Opcode::Nop,
                Width::W8,
                Width::W8,
                ImmediateType::None,
                ImmediateValue::None,
            )
            .unwrap();
        assert_eq!(off, 1);

        let off = enc
            .encode(
                Some(&mut buf),
                off,
                Opcode::LoadImmediateNum,
                Width::W32,
                Width::W32,
                ImmediateType::I32,
                ImmediateValue::U32(0xAABB_CCDD),
            )
            .unwrap();
        // opcode at 1, pad byte at 2-3, immediate at 4..8
        assert_eq!(off, 8);
        assert_eq!(buf.len(), 8);
        let imm_bytes: [u8; 4] = buf[4..8].try_into().unwrap();
        assert_eq!(u32::from_ne_bytes(imm_bytes), 0xAABB_CCDD);
    }

    #[test]
    fn test_roll_2_peephole_byte_identical_to_swap() {
        let enc = encoder();
        let mut roll_buf = Vec::new();
        enc.encode(
            Some(&mut roll_buf),
            0,
            Opcode::Roll,
            Width::W8,
            Width::W8,
            ImmediateType::I8,
            ImmediateValue::U8(2),
        )
        .unwrap();

        let mut swap_buf = Vec::new();
        enc.encode(
            Some(&mut swap_buf),
            0,
            Opcode::Swap,
            Width::W8,
            Width::W8,
            ImmediateType::None,
            ImmediateValue::None,
        )
        .unwrap();

        assert_eq!(roll_buf, swap_buf);
    }

    #[test]
    fn test_pick_1_peephole_byte_identical_to_dup() {
        let enc = encoder();
        let mut pick_buf = Vec::new();
        enc.encode(
            Some(&mut pick_buf),
            0,
            Opcode::Pick,
            Width::W8,
            Width::W8,
            ImmediateType::I8,
            ImmediateValue::U8(1),
        )
        .unwrap();

        let mut dup_buf = Vec::new();
        enc.encode(
            Some(&mut dup_buf),
            0,
            Opcode::Dup,
            Width::W8,
            Width::W8,
            ImmediateType::None,
            ImmediateValue::None,
        )
        .unwrap();

        assert_eq!(pick_buf, dup_buf);
    }

    #[test]
    fn test_unsupported_combination_errors() {
        let enc = encoder();
        let err = enc
            .encode(
                None,
                0,
                Opcode::Ze,
                Width::W64,
                Width::W8,
                ImmediateType::None,
                ImmediateValue::None,
            )
            .unwrap_err();
        assert!(matches!(err, EncodeError::UnsupportedWidths { .. }));
    }
}
