// ============================================================================
// Protocol Module
// Byte-level framing for the UART link to the FPGA
// ============================================================================

mod frame;

pub use frame::{
    build_outbound_frame, decode_outbound_frame, encode_q16, parse_inbound_frame, InboundFrame,
    ACTION_MASK, INBOUND_FRAME_LEN, OUTBOUND_FRAME_LEN,
};
