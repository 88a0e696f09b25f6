use std::ffi::CStr;
use std::ptr::null;

use gl::types::*;

/// Creates a shader object of the given kind, hands it the source and compiles it. Whether it
/// compiled is left for the caller to ask.
pub fn shader_from_source(source: &CStr, kind: GLenum) -> GLuint {
    let id = unsafe { gl::CreateShader(kind) };
    unsafe {
        gl::ShaderSource(id, 1, &source.as_ptr(), null());
        gl::CompileShader(id);
    }

    id
}

/// A zeroed buffer big enough for an info log of `len` bytes (including the NUL GL writes).
pub fn info_log_buffer(len: GLint) -> Vec<u8> {
    vec![0u8; len.max(1) as usize]
}

/// Turns what GL wrote into an info log buffer into a string. `written` is the length GL
/// reported, which doesn't count the terminating NUL.
pub fn info_log_to_string(mut buf: Vec<u8>, written: GLsizei) -> String {
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf)
        .trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_log_still_gets_room_for_the_nul() {
        assert_eq!(info_log_buffer(0).len(), 1);
        assert_eq!(info_log_buffer(-4).len(), 1);
        assert_eq!(info_log_buffer(512).len(), 512);
    }

    #[test]
    fn log_is_cut_to_what_was_written() {
        let mut buf = info_log_buffer(32);
        buf[..20].copy_from_slice(b"0:3(1): error: oops\n");

        assert_eq!(info_log_to_string(buf, 20), "0:3(1): error: oops");
    }

    #[test]
    fn garbage_past_the_written_length_is_dropped() {
        let buf = b"bad link\0\xff\xff".to_vec();

        assert_eq!(info_log_to_string(buf, 8), "bad link");
    }
}
