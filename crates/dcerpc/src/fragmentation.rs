//! PDU fragmentation
//!
//! When stub data exceeds the fragment size negotiated during bind, a call
//! is split across several request (or response) PDUs. Every fragment
//! carries the same call_id and the total stub length in `alloc_hint`;
//! FIRST_FRAG marks the first one and LAST_FRAG the last.
//!
//! ```text
//! max_frag (e.g. 4280 bytes)
//! ├── PDU header (16 bytes)
//! ├── request/response body header (8 bytes)
//! ├── object UUID (16 bytes, optional, request only)
//! └── stub data fragment
//! ```

use crate::error::{Result, RpcError};
use crate::pdu::{PacketFlags, PduHeader, RequestPdu, ResponsePdu};
use bytes::{Bytes, BytesMut};

/// Splits outgoing stub data into fragments.
pub struct FragmentGenerator;

impl FragmentGenerator {
    /// Maximum stub bytes that fit in one fragment of `max_frag` bytes.
    pub fn max_stub_size(max_frag: u16, has_object_uuid: bool) -> usize {
        let object_uuid_size = if has_object_uuid { 16 } else { 0 };
        let overhead = PduHeader::SIZE + RequestPdu::BODY_HEADER_SIZE + object_uuid_size;
        (max_frag as usize).saturating_sub(overhead)
    }

    /// Split a request into fragments, or return it alone with both flags
    /// set when it fits.
    pub fn fragment_request(request: &RequestPdu, max_frag: u16) -> Vec<RequestPdu> {
        let max_stub = Self::max_stub_size(max_frag, request.object_uuid.is_some());
        Self::split(&request.stub_data, max_stub)
            .map(|(chunk, flags)| {
                let mut frag = request.clone();
                frag.header.packet_flags = flags;
                frag.alloc_hint = request.stub_data.len() as u32;
                frag.stub_data = chunk;
                frag
            })
            .collect()
    }

    /// Split a response into fragments.
    pub fn fragment_response(response: &ResponsePdu, max_frag: u16) -> Vec<ResponsePdu> {
        let max_stub = Self::max_stub_size(max_frag, false);
        Self::split(&response.stub_data, max_stub)
            .map(|(chunk, flags)| {
                let mut frag = response.clone();
                frag.header.packet_flags = flags;
                frag.alloc_hint = response.stub_data.len() as u32;
                frag.stub_data = chunk;
                frag
            })
            .collect()
    }

    fn split(stub: &Bytes, max_stub: usize) -> impl Iterator<Item = (Bytes, PacketFlags)> + '_ {
        let max_stub = max_stub.max(1);
        let total = stub.len();
        let count = total.div_ceil(max_stub).max(1);

        (0..count).map(move |i| {
            let start = i * max_stub;
            let end = (start + max_stub).min(total);

            let mut flags = PacketFlags::new();
            if i == 0 {
                flags.set_first_frag();
            }
            if i + 1 == count {
                flags.set_last_frag();
            }
            (stub.slice(start..end), flags)
        })
    }
}

/// Reassembles the stub data of a fragmented response.
pub struct FragmentAssembler {
    call_id: u32,
    stub_data: BytesMut,
    context_id: u16,
    received_first: bool,
    max_size: usize,
}

impl FragmentAssembler {
    /// Assembler for `call_id` that refuses to grow past `max_size` bytes.
    pub fn new(call_id: u32, max_size: usize) -> Self {
        Self {
            call_id,
            stub_data: BytesMut::new(),
            context_id: 0,
            received_first: false,
            max_size,
        }
    }

    pub fn call_id(&self) -> u32 {
        self.call_id
    }

    /// Add one fragment.
    ///
    /// Returns `Ok(Some(stub))` once LAST_FRAG arrives and `Ok(None)` while
    /// more fragments are expected.
    pub fn add_fragment(
        &mut self,
        header: &PduHeader,
        stub: &[u8],
        context_id: u16,
        alloc_hint: u32,
    ) -> Result<Option<Bytes>> {
        if header.call_id != self.call_id {
            return Err(RpcError::CallIdMismatch {
                expected: self.call_id,
                got: header.call_id,
            });
        }

        if header.packet_flags.is_first_frag() {
            if self.received_first {
                return Err(RpcError::FragmentAssemblyError(
                    "received duplicate first fragment".to_string(),
                ));
            }
            self.received_first = true;
            self.context_id = context_id;
            self.stub_data.reserve((alloc_hint as usize).min(self.max_size));
        } else if !self.received_first {
            return Err(RpcError::FragmentOutOfOrder);
        }

        if context_id != self.context_id {
            return Err(RpcError::ContextMismatch);
        }

        let size = self.stub_data.len() + stub.len();
        if size > self.max_size {
            return Err(RpcError::PduTooLarge {
                size,
                max: self.max_size,
            });
        }
        self.stub_data.extend_from_slice(stub);

        if header.packet_flags.is_last_frag() {
            Ok(Some(self.stub_data.split().freeze()))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdu::PacketType;

    fn header(call_id: u32, first: bool, last: bool) -> PduHeader {
        let mut header = PduHeader::new(PacketType::Response, call_id);
        header.packet_flags = PacketFlags::new();
        if first {
            header.packet_flags.set_first_frag();
        }
        if last {
            header.packet_flags.set_last_frag();
        }
        header
    }

    #[test]
    fn test_max_stub_size_calculation() {
        assert_eq!(FragmentGenerator::max_stub_size(4280, false), 4256);
        assert_eq!(FragmentGenerator::max_stub_size(4280, true), 4240);
        assert_eq!(FragmentGenerator::max_stub_size(10, false), 0);
    }

    #[test]
    fn test_fragment_single_pdu() {
        let stub = Bytes::from(vec![0u8; 100]);
        let request = RequestPdu::new(1, 5, stub.clone());

        let fragments = FragmentGenerator::fragment_request(&request, 4280);

        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].header.packet_flags.is_first_frag());
        assert!(fragments[0].header.packet_flags.is_last_frag());
        assert_eq!(fragments[0].stub_data, stub);
    }

    #[test]
    fn test_empty_stub_is_one_fragment() {
        let request = RequestPdu::new(1, 0, Bytes::new());
        let fragments = FragmentGenerator::fragment_request(&request, 4280);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].header.packet_flags, PacketFlags::complete());
    }

    #[test]
    fn test_fragment_multiple_pdus() {
        let total_size = 10000;
        let stub = Bytes::from((0..total_size).map(|i| i as u8).collect::<Vec<_>>());
        let request = RequestPdu::new(1, 5, stub.clone());

        // 1000 - 24 = 976 stub bytes per fragment
        let fragments = FragmentGenerator::fragment_request(&request, 1000);
        assert_eq!(fragments.len(), 11);

        assert!(fragments[0].header.packet_flags.is_first_frag());
        assert!(!fragments[0].header.packet_flags.is_last_frag());
        for frag in &fragments[1..10] {
            assert!(!frag.header.packet_flags.is_first_frag());
            assert!(!frag.header.packet_flags.is_last_frag());
        }
        assert!(fragments[10].header.packet_flags.is_last_frag());

        for frag in &fragments {
            assert_eq!(frag.opnum, 5);
            assert_eq!(frag.alloc_hint, total_size as u32);
            assert!(frag.encode().unwrap().len() <= 1000);
        }

        let joined: Vec<u8> = fragments.iter().flat_map(|f| f.stub_data.iter().copied()).collect();
        assert_eq!(Bytes::from(joined), stub);
    }

    #[test]
    fn test_generator_and_assembler_agree() {
        let stub = Bytes::from(vec![0xAA; 5000]);
        let response = ResponsePdu::new(42, stub.clone());
        let fragments = FragmentGenerator::fragment_response(&response, 1000);

        let mut assembler = FragmentAssembler::new(42, 1 << 20);
        let mut complete = None;
        for frag in &fragments {
            complete = assembler
                .add_fragment(&frag.header, &frag.stub_data, frag.context_id, frag.alloc_hint)
                .unwrap();
        }
        assert_eq!(complete, Some(stub));
    }

    #[test]
    fn test_assembler_call_id_mismatch() {
        let mut assembler = FragmentAssembler::new(1, 1024);
        let result = assembler.add_fragment(&header(2, true, true), b"data", 0, 4);
        assert!(matches!(result, Err(RpcError::CallIdMismatch { expected: 1, got: 2 })));
    }

    #[test]
    fn test_assembler_out_of_order() {
        let mut assembler = FragmentAssembler::new(1, 1024);
        let result = assembler.add_fragment(&header(1, false, false), b"data", 0, 4);
        assert!(matches!(result, Err(RpcError::FragmentOutOfOrder)));
    }

    #[test]
    fn test_assembler_duplicate_first() {
        let mut assembler = FragmentAssembler::new(1, 1024);
        assembler.add_fragment(&header(1, true, false), b"ab", 0, 4).unwrap();
        let result = assembler.add_fragment(&header(1, true, false), b"cd", 0, 4);
        assert!(matches!(result, Err(RpcError::FragmentAssemblyError(_))));
    }

    #[test]
    fn test_assembler_context_mismatch() {
        let mut assembler = FragmentAssembler::new(1, 1024);
        assembler.add_fragment(&header(1, true, false), b"ab", 0, 4).unwrap();
        let result = assembler.add_fragment(&header(1, false, true), b"cd", 1, 4);
        assert!(matches!(result, Err(RpcError::ContextMismatch)));
    }

    #[test]
    fn test_assembler_size_limit() {
        let mut assembler = FragmentAssembler::new(1, 6);
        assembler.add_fragment(&header(1, true, false), b"abcd", 0, 0).unwrap();
        let result = assembler.add_fragment(&header(1, false, true), b"efg", 0, 0);
        assert!(matches!(result, Err(RpcError::PduTooLarge { size: 7, max: 6 })));
    }
}
