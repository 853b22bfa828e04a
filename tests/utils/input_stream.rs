use proptest_derive::Arbitrary;

/// Input split into the chunks it should be written in.
#[derive(Arbitrary, Debug, Clone)]
pub struct InputStream(Vec<Vec<u8>>);

impl InputStream {
    pub fn as_ref(&self) -> &[Vec<u8>] {
        &self.0
    }

    /// The chunks with an empty chunk before and after each one, so that every write boundary
    /// also sees an empty write.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> {
        self.0
            .iter()
            .flat_map(|chunk| vec![&[][..], &chunk[..]])
            .chain(Some(&[][..]))
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.0.iter().flatten().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }
}

// This happens to be the only dimension we're using
impl From<[[u8; 3]; 2]> for InputStream {
    fn from(input: [[u8; 3]; 2]) -> InputStream {
        InputStream(vec![Vec::from(&input[0][..]), Vec::from(&input[1][..])])
    }
}

impl From<Vec<Vec<u8>>> for InputStream {
    fn from(input: Vec<Vec<u8>>) -> InputStream {
        InputStream(input)
    }
}
