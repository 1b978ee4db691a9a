//! Program image loading.
use crate::definitions::{cpu, memory};
use crate::error::LoadError;

/// The number of bytes available to a program, starting at
/// [`cpu::PROGRAM_COUNTER`] and running to the end of RAM.
pub const MAX_ROM_SIZE: usize = memory::SIZE - cpu::PROGRAM_COUNTER;

/// A validated program image, ready to be copied into RAM.
///
/// Validation happens at construction time so that
/// [`Chip8::load`](crate::Chip8::load) can reject a bad image without
/// mutating any VM state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    data: Box<[u8]>,
}

impl Rom {
    /// Validates `data` as a loadable program image.
    pub fn new(data: &[u8]) -> Result<Self, LoadError> {
        if data.is_empty() {
            return Err(LoadError::Empty);
        }
        if data.len() > MAX_ROM_SIZE {
            return Err(LoadError::TooBig {
                available: MAX_ROM_SIZE,
                len: data.len(),
            });
        }
        Ok(Self {
            data: data.to_vec().into_boxed_slice(),
        })
    }

    /// Will return the validated image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_image_is_rejected() {
        assert_eq!(Rom::new(&[]), Err(LoadError::Empty));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let data = vec![0u8; MAX_ROM_SIZE + 1];
        assert_eq!(
            Rom::new(&data),
            Err(LoadError::TooBig {
                available: MAX_ROM_SIZE,
                len: MAX_ROM_SIZE + 1
            })
        );
    }

    #[test]
    fn max_size_image_is_accepted() {
        let data = vec![0u8; MAX_ROM_SIZE];
        assert!(Rom::new(&data).is_ok());
    }
}
