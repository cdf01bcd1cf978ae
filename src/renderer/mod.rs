pub mod gst_element;
pub mod source;
