use crate::{
    automaton::{
        automaton::Automaton,
        index::IndexPattern,
        node::{Edge, Node, PatternEntry},
    },
    error::*,
    utils::{as_bytes, AsBytes},
};
use snafu::ResultExt;
use std::{
    ffi::{c_void, CStr},
    fs::{File, Metadata, OpenOptions},
    io::Write,
    mem::size_of,
    path::Path,
};

/// A compiled automaton over the byte alphabet with `u32` pattern
/// identifiers, the only instantiation given an on-disk representation.
pub type ByteAutomaton<'a> = Automaton<'a, u8, u32>;

/// The header of the automaton file.
/// Contains information about the file structure, helping its parsing.
#[derive(Debug, Copy, Clone)]
pub struct Header {
    pub nb_nodes: usize,
    pub nb_edges: usize,
    pub nb_outputs: usize,
    pub nb_patterns: usize,
}

/// The automaton created by the index binary and saved in a file
/// to be later used by the query binary.
/// The same structure can be used for reading and writing.
///
/// When read, this structure holds the mmaped file and provides a safer
/// and easier interface to its content by typing the inner data,
/// without copying the entire file in memory.
#[derive(Debug)]
pub struct AutomatonFile<'a> {
    // Read the file if mmap not available
    #[cfg(windows)]
    read_bytes: Vec<u8>,

    mmap_ptr: *const c_void,
    ptr_len: usize,

    pub header: Header,
    pub automaton: ByteAutomaton<'a>,
}

/// Helper function to get the error string from errno after a failed libc function call.
#[cfg(not(windows))]
unsafe fn strerror() -> Option<&'static str> {
    let errno = *libc::__errno_location();
    let strerror = libc::strerror(errno);
    let cstr = CStr::from_ptr(strerror);
    cstr.to_str().ok()
}

impl AutomatonFile<'_> {
    /// Return the offset pointers of the inner data which is composed of:
    /// - `Header` (offset 0, not returned)
    /// - `Vec<Node>`
    /// - `Vec<Edge<u8>>`
    /// - `Vec<IndexPattern>`
    /// - `Vec<PatternEntry<u32>>`
    unsafe fn get_offsets_ptr(
        header: &Header,
        ptr: *const c_void,
    ) -> (*const c_void, *const c_void, *const c_void, *const c_void) {
        const HEADER_LEN: usize = size_of::<Header>();
        const NODE_LEN: usize = size_of::<Node>();
        const EDGE_LEN: usize = size_of::<Edge<u8>>();
        const OUTPUT_LEN: usize = size_of::<IndexPattern>();

        let nodes_ptr = ptr.offset(HEADER_LEN as isize);
        let edges_ptr = nodes_ptr.offset((header.nb_nodes * NODE_LEN) as isize);
        let outputs_ptr = edges_ptr.offset((header.nb_edges * EDGE_LEN) as isize);
        let patterns_ptr = outputs_ptr.offset((header.nb_outputs * OUTPUT_LEN) as isize);

        (nodes_ptr, edges_ptr, outputs_ptr, patterns_ptr)
    }

    /// Type the four automaton arrays found behind the given pointer.
    unsafe fn type_automaton(header: &Header, ptr: *const c_void) -> ByteAutomaton<'static> {
        // Get the offset pointers to each array
        let (nodes_ptr, edges_ptr, outputs_ptr, patterns_ptr) = Self::get_offsets_ptr(header, ptr);

        // Type each array
        let nodes = std::slice::from_raw_parts(nodes_ptr as *const Node, header.nb_nodes);
        let edges = std::slice::from_raw_parts(edges_ptr as *const Edge<u8>, header.nb_edges);
        let outputs =
            std::slice::from_raw_parts(outputs_ptr as *const IndexPattern, header.nb_outputs);
        let patterns = std::slice::from_raw_parts(
            patterns_ptr as *const PatternEntry<u32>,
            header.nb_patterns,
        );

        // Create a borrowing automaton
        Automaton::from_parts(nodes, edges, outputs, patterns)
    }

    /// Try to read the automaton from a file, previously written using the
    /// [write_file](AutomatonFile::write_file) method.
    /// Uses mmap internally *on unix platforms* to reduce memory usage.
    #[cfg(not(windows))]
    pub fn read_file(path: &Path) -> Result<Self> {
        // Open the file and read its length
        let file: File = File::open(path).context(FileOpen { path })?;
        let meta: Metadata = file.metadata().context(FileMeta { path })?;
        let file_len = meta.len() as usize;

        use std::os::unix::io::IntoRawFd;
        let fd = file.into_raw_fd();

        // mmap the file instead of reading it for speed and low memory consumption
        let mmap_ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                file_len,
                libc::PROT_READ,
                libc::MAP_SHARED,
                fd,
                0,
            )
        };

        // Return an error if mmap failed
        snafu::ensure!(
            mmap_ptr != libc::MAP_FAILED,
            FileMmap {
                path,
                strerror: unsafe { strerror() }.unwrap_or("Unknown")
            }
        );

        // The mapping stays valid after the descriptor is closed
        unsafe { libc::close(fd) };

        // Type and read the header
        let header = unsafe { *(mmap_ptr as *const Header) };

        // Type the automaton arrays
        let automaton = unsafe { Self::type_automaton(&header, mmap_ptr) };

        Ok(Self {
            mmap_ptr,
            ptr_len: file_len,
            header,
            automaton,
        })
    }

    #[cfg(windows)]
    pub fn read_file(path: &Path) -> Result<Self> {
        // Open the file and read its length
        let mut file: File = File::open(path).context(FileOpen { path })?;
        let meta: Metadata = file.metadata().context(FileMeta { path })?;
        let file_len = meta.len() as usize;

        let (mmap_ptr, read_bytes) = {
            use std::io::Read;

            let mut buf = vec![0u8; file_len];
            file.read_exact(&mut buf).context(FileRead { path })?;

            (buf.as_ptr() as *const c_void, buf)
        };

        // Type and read the header
        let header = unsafe { *(mmap_ptr as *const Header) };

        // Type the automaton arrays
        let automaton = unsafe { Self::type_automaton(&header, mmap_ptr) };

        Ok(Self {
            read_bytes,
            mmap_ptr: std::ptr::null(),
            ptr_len: 0,
            header,
            automaton,
        })
    }

    /// Try to write the automaton to a file.
    /// The file contents is not portable and must be read using the
    /// [read_file](AutomatonFile::read_file) method.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .context(FileOpen { path })?;

        // Write in the correct order:
        // - Header
        // - Nodes
        // - Edges
        // - Outputs
        // - Patterns
        let contents = [
            as_bytes(&self.header),
            self.automaton.nodes().as_bytes(),
            self.automaton.edges().as_bytes(),
            self.automaton.outputs().as_bytes(),
            self.automaton.patterns().as_bytes(),
        ];

        for bytes in &contents {
            file.write_all(bytes).context(FileWrite { path })?;
        }

        Ok(())
    }
}

#[cfg(not(windows))]
impl Drop for AutomatonFile<'_> {
    fn drop(&mut self) {
        // munmap the inner pointer if the struct was read from a file
        if !self.mmap_ptr.is_null() {
            unsafe { libc::munmap(self.mmap_ptr as *mut c_void, self.ptr_len) };
        }
    }
}

impl<'a> From<ByteAutomaton<'a>> for AutomatonFile<'a> {
    fn from(automaton: ByteAutomaton<'a>) -> Self {
        let header = Header {
            nb_nodes: automaton.nodes().len(),
            nb_edges: automaton.edges().len(),
            nb_outputs: automaton.outputs().len(),
            nb_patterns: automaton.patterns().len(),
        };

        // Create an automaton file that is not mapped to a file
        Self {
            #[cfg(windows)]
            read_bytes: Vec::new(),
            mmap_ptr: std::ptr::null(),
            ptr_len: 0,
            header,
            automaton,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TrieBuilder;

    #[test]
    fn write_then_read_scans_identically() {
        let mut builder = TrieBuilder::new();
        for (id, pattern) in ["he", "she", "his", "hers"].iter().enumerate() {
            builder.insert(pattern.as_bytes(), id as u32);
        }
        let automaton = builder.compile();

        let expected: Vec<(u32, usize, usize)> = automaton
            .scan("ushers".bytes())
            .map(|found| (*found.pattern_id, found.start, found.end))
            .collect();

        let path = std::env::temp_dir().join("multi-search-roundtrip-test.bin");
        AutomatonFile::from(automaton)
            .write_file(&path)
            .expect("write automaton file");

        {
            let read = AutomatonFile::read_file(&path).expect("read automaton file");
            assert_eq!(read.header.nb_patterns, 4);

            let found: Vec<(u32, usize, usize)> = read
                .automaton
                .scan("ushers".bytes())
                .map(|found| (*found.pattern_id, found.start, found.end))
                .collect();
            assert_eq!(found, expected);
        }

        let _ = std::fs::remove_file(&path);
    }
}
