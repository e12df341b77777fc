//! frames_capnp.rs
//! Typed readers and builders for `frames.capnp`.
//!
//! ```capnp
//! struct Rational   { num @0 :UInt32; den @1 :UInt32; }
//! struct AudioFrame { numSamples @0 :UInt32; channels @1 :UInt16; data @2 :Data;
//!                     streamId @3 :UInt32; pts @4 :Rational; }
//! struct VideoFrame { width @0 :UInt32; height @1 :UInt32; data @2 :Data;
//!                     pixelFormat @3 :PixelFormat; streamId @4 :UInt32; pts @5 :Rational;
//!                     enum PixelFormat { rgba @0; } }
//! struct Frame      { union { audioFrame @0 :AudioFrame; videoFrame @1 :VideoFrame; } }
//! struct Frames     { frames @0 :List(Frame); }
//! ```
//!
//! Same shape as `capnpc` output (reader/builder pairs over
//! `capnp::private::layout`), without the schema introspection and RPC
//! pipelines the decoder never uses. Field offsets are in units of the
//! field's own width.

use capnp::private::layout::{
    ElementSize, ListBuilder, ListReader, PointerBuilder, PointerReader, StructBuilder, StructReader, StructSize,
};
use capnp::traits::{FromPointerBuilder, FromPointerReader, HasStructSize, HasTypeId};

pub mod rational {
    use super::*;

    #[derive(Clone, Copy)]
    pub struct Reader<'a> {
        reader: StructReader<'a>,
    }

    impl<'a> From<StructReader<'a>> for Reader<'a> {
        fn from(reader: StructReader<'a>) -> Self {
            Self { reader }
        }
    }

    impl<'a> FromPointerReader<'a> for Reader<'a> {
        fn get_from_pointer(reader: &PointerReader<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(reader.get_struct(default)?.into())
        }
    }

    impl HasTypeId for Reader<'_> {
        const TYPE_ID: u64 = _private::TYPE_ID;
    }

    impl<'a> Reader<'a> {
        #[inline]
        pub fn get_num(self) -> u32 {
            self.reader.get_data_field::<u32>(0)
        }

        #[inline]
        pub fn get_den(self) -> u32 {
            self.reader.get_data_field::<u32>(1)
        }
    }

    pub struct Builder<'a> {
        builder: StructBuilder<'a>,
    }

    impl<'a> From<StructBuilder<'a>> for Builder<'a> {
        fn from(builder: StructBuilder<'a>) -> Self {
            Self { builder }
        }
    }

    impl HasStructSize for Builder<'_> {
        const STRUCT_SIZE: StructSize = StructSize { data: 1, pointers: 0 };
    }

    impl<'a> FromPointerBuilder<'a> for Builder<'a> {
        fn init_pointer(builder: PointerBuilder<'a>, _size: u32) -> Self {
            builder.init_struct(<Self as HasStructSize>::STRUCT_SIZE).into()
        }

        fn get_from_pointer(builder: PointerBuilder<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(builder.get_struct(<Self as HasStructSize>::STRUCT_SIZE, default)?.into())
        }
    }

    impl<'a> Builder<'a> {
        pub fn reborrow(&mut self) -> Builder<'_> {
            Builder { builder: self.builder.reborrow() }
        }

        pub fn into_reader(self) -> Reader<'a> {
            self.builder.into_reader().into()
        }

        #[inline]
        pub fn set_num(&mut self, value: u32) {
            self.builder.set_data_field::<u32>(0, value);
        }

        #[inline]
        pub fn set_den(&mut self, value: u32) {
            self.builder.set_data_field::<u32>(1, value);
        }
    }

    mod _private {
        pub const TYPE_ID: u64 = 0xe600_9259_93c2_3cf3;
    }
}

pub mod audio_frame {
    use super::*;

    #[derive(Clone, Copy)]
    pub struct Reader<'a> {
        reader: StructReader<'a>,
    }

    impl<'a> From<StructReader<'a>> for Reader<'a> {
        fn from(reader: StructReader<'a>) -> Self {
            Self { reader }
        }
    }

    impl<'a> FromPointerReader<'a> for Reader<'a> {
        fn get_from_pointer(reader: &PointerReader<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(reader.get_struct(default)?.into())
        }
    }

    impl HasTypeId for Reader<'_> {
        const TYPE_ID: u64 = _private::TYPE_ID;
    }

    impl<'a> Reader<'a> {
        #[inline]
        pub fn get_num_samples(self) -> u32 {
            self.reader.get_data_field::<u32>(0)
        }

        #[inline]
        pub fn get_channels(self) -> u16 {
            self.reader.get_data_field::<u16>(2)
        }

        #[inline]
        pub fn get_data(self) -> capnp::Result<capnp::data::Reader<'a>> {
            self.reader.get_pointer_field(0).get_data(None)
        }

        pub fn has_data(&self) -> bool {
            !self.reader.get_pointer_field(0).is_null()
        }

        #[inline]
        pub fn get_stream_id(self) -> u32 {
            self.reader.get_data_field::<u32>(2)
        }

        #[inline]
        pub fn get_pts(self) -> capnp::Result<rational::Reader<'a>> {
            FromPointerReader::get_from_pointer(&self.reader.get_pointer_field(1), None)
        }

        pub fn has_pts(&self) -> bool {
            !self.reader.get_pointer_field(1).is_null()
        }
    }

    pub struct Builder<'a> {
        builder: StructBuilder<'a>,
    }

    impl<'a> From<StructBuilder<'a>> for Builder<'a> {
        fn from(builder: StructBuilder<'a>) -> Self {
            Self { builder }
        }
    }

    impl HasStructSize for Builder<'_> {
        const STRUCT_SIZE: StructSize = StructSize { data: 2, pointers: 2 };
    }

    impl<'a> FromPointerBuilder<'a> for Builder<'a> {
        fn init_pointer(builder: PointerBuilder<'a>, _size: u32) -> Self {
            builder.init_struct(<Self as HasStructSize>::STRUCT_SIZE).into()
        }

        fn get_from_pointer(builder: PointerBuilder<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(builder.get_struct(<Self as HasStructSize>::STRUCT_SIZE, default)?.into())
        }
    }

    impl<'a> Builder<'a> {
        pub fn reborrow(&mut self) -> Builder<'_> {
            Builder { builder: self.builder.reborrow() }
        }

        pub fn into_reader(self) -> Reader<'a> {
            self.builder.into_reader().into()
        }

        #[inline]
        pub fn set_num_samples(&mut self, value: u32) {
            self.builder.set_data_field::<u32>(0, value);
        }

        #[inline]
        pub fn set_channels(&mut self, value: u16) {
            self.builder.set_data_field::<u16>(2, value);
        }

        #[inline]
        pub fn set_data(&mut self, value: &[u8]) {
            self.builder.reborrow().get_pointer_field(0).set_data(value);
        }

        #[inline]
        pub fn set_stream_id(&mut self, value: u32) {
            self.builder.set_data_field::<u32>(2, value);
        }

        #[inline]
        pub fn init_pts(self) -> rational::Builder<'a> {
            FromPointerBuilder::init_pointer(self.builder.get_pointer_field(1), 0)
        }
    }

    mod _private {
        pub const TYPE_ID: u64 = 0xe2c1_8159_5b76_8329;
    }
}

pub mod video_frame {
    use num_enum::TryFromPrimitive;

    use super::*;
    use crate::constants::pixel_formats;

    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
    #[num_enum(error_type(name = capnp::NotInSchema, constructor = capnp::NotInSchema))]
    pub enum PixelFormat {
        Rgba = pixel_formats::RGBA,
    }

    #[derive(Clone, Copy)]
    pub struct Reader<'a> {
        reader: StructReader<'a>,
    }

    impl<'a> From<StructReader<'a>> for Reader<'a> {
        fn from(reader: StructReader<'a>) -> Self {
            Self { reader }
        }
    }

    impl<'a> FromPointerReader<'a> for Reader<'a> {
        fn get_from_pointer(reader: &PointerReader<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(reader.get_struct(default)?.into())
        }
    }

    impl HasTypeId for Reader<'_> {
        const TYPE_ID: u64 = _private::TYPE_ID;
    }

    impl<'a> Reader<'a> {
        #[inline]
        pub fn get_width(self) -> u32 {
            self.reader.get_data_field::<u32>(0)
        }

        #[inline]
        pub fn get_height(self) -> u32 {
            self.reader.get_data_field::<u32>(1)
        }

        #[inline]
        pub fn get_data(self) -> capnp::Result<capnp::data::Reader<'a>> {
            self.reader.get_pointer_field(0).get_data(None)
        }

        pub fn has_data(&self) -> bool {
            !self.reader.get_pointer_field(0).is_null()
        }

        /// Enumerants added after this schema come back as `Err(NotInSchema(raw))`.
        #[inline]
        pub fn get_pixel_format(self) -> Result<PixelFormat, capnp::NotInSchema> {
            PixelFormat::try_from(self.reader.get_data_field::<u16>(4))
        }

        #[inline]
        pub fn get_stream_id(self) -> u32 {
            self.reader.get_data_field::<u32>(3)
        }

        #[inline]
        pub fn get_pts(self) -> capnp::Result<rational::Reader<'a>> {
            FromPointerReader::get_from_pointer(&self.reader.get_pointer_field(1), None)
        }

        pub fn has_pts(&self) -> bool {
            !self.reader.get_pointer_field(1).is_null()
        }
    }

    pub struct Builder<'a> {
        builder: StructBuilder<'a>,
    }

    impl<'a> From<StructBuilder<'a>> for Builder<'a> {
        fn from(builder: StructBuilder<'a>) -> Self {
            Self { builder }
        }
    }

    impl HasStructSize for Builder<'_> {
        const STRUCT_SIZE: StructSize = StructSize { data: 2, pointers: 2 };
    }

    impl<'a> FromPointerBuilder<'a> for Builder<'a> {
        fn init_pointer(builder: PointerBuilder<'a>, _size: u32) -> Self {
            builder.init_struct(<Self as HasStructSize>::STRUCT_SIZE).into()
        }

        fn get_from_pointer(builder: PointerBuilder<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(builder.get_struct(<Self as HasStructSize>::STRUCT_SIZE, default)?.into())
        }
    }

    impl<'a> Builder<'a> {
        pub fn reborrow(&mut self) -> Builder<'_> {
            Builder { builder: self.builder.reborrow() }
        }

        pub fn into_reader(self) -> Reader<'a> {
            self.builder.into_reader().into()
        }

        #[inline]
        pub fn set_width(&mut self, value: u32) {
            self.builder.set_data_field::<u32>(0, value);
        }

        #[inline]
        pub fn set_height(&mut self, value: u32) {
            self.builder.set_data_field::<u32>(1, value);
        }

        #[inline]
        pub fn set_data(&mut self, value: &[u8]) {
            self.builder.reborrow().get_pointer_field(0).set_data(value);
        }

        #[inline]
        pub fn set_pixel_format(&mut self, value: PixelFormat) {
            self.builder.set_data_field::<u16>(4, value as u16);
        }

        /// Store a raw enumerant, including ones this schema does not name.
        #[inline]
        pub fn set_pixel_format_raw(&mut self, value: u16) {
            self.builder.set_data_field::<u16>(4, value);
        }

        #[inline]
        pub fn set_stream_id(&mut self, value: u32) {
            self.builder.set_data_field::<u32>(3, value);
        }

        #[inline]
        pub fn init_pts(self) -> rational::Builder<'a> {
            FromPointerBuilder::init_pointer(self.builder.get_pointer_field(1), 0)
        }
    }

    mod _private {
        pub const TYPE_ID: u64 = 0xd0d3_ae08_69b4_d05c;
    }
}

pub mod frame {
    use super::*;
    use crate::constants::frame_tags;

    /// Active member of the `Frame` union.
    pub enum Which<A0, A1> {
        AudioFrame(A0),
        VideoFrame(A1),
    }

    pub type WhichReader<'a> = Which<capnp::Result<audio_frame::Reader<'a>>, capnp::Result<video_frame::Reader<'a>>>;
    pub type WhichBuilder<'a> = Which<capnp::Result<audio_frame::Builder<'a>>, capnp::Result<video_frame::Builder<'a>>>;

    #[derive(Clone, Copy)]
    pub struct Reader<'a> {
        reader: StructReader<'a>,
    }

    impl<'a> From<StructReader<'a>> for Reader<'a> {
        fn from(reader: StructReader<'a>) -> Self {
            Self { reader }
        }
    }

    impl<'a> FromPointerReader<'a> for Reader<'a> {
        fn get_from_pointer(reader: &PointerReader<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(reader.get_struct(default)?.into())
        }
    }

    impl HasTypeId for Reader<'_> {
        const TYPE_ID: u64 = _private::TYPE_ID;
    }

    impl<'a> Reader<'a> {
        /// Raw union discriminant.
        #[inline]
        pub fn get_discriminant(self) -> u16 {
            self.reader.get_data_field::<u16>(0)
        }

        pub fn has_audio_frame(&self) -> bool {
            self.get_discriminant() == frame_tags::AUDIO_FRAME && !self.reader.get_pointer_field(0).is_null()
        }

        pub fn has_video_frame(&self) -> bool {
            self.get_discriminant() == frame_tags::VIDEO_FRAME && !self.reader.get_pointer_field(0).is_null()
        }

        /// Select the active member. The body is not dereferenced until the
        /// returned `Result` inside `Which` is produced.
        pub fn which(self) -> Result<WhichReader<'a>, capnp::NotInSchema> {
            match self.get_discriminant() {
                frame_tags::AUDIO_FRAME => Ok(Which::AudioFrame(FromPointerReader::get_from_pointer(
                    &self.reader.get_pointer_field(0),
                    None,
                ))),
                frame_tags::VIDEO_FRAME => Ok(Which::VideoFrame(FromPointerReader::get_from_pointer(
                    &self.reader.get_pointer_field(0),
                    None,
                ))),
                tag => Err(capnp::NotInSchema(tag)),
            }
        }
    }

    pub struct Builder<'a> {
        builder: StructBuilder<'a>,
    }

    impl<'a> From<StructBuilder<'a>> for Builder<'a> {
        fn from(builder: StructBuilder<'a>) -> Self {
            Self { builder }
        }
    }

    impl HasStructSize for Builder<'_> {
        const STRUCT_SIZE: StructSize = StructSize { data: 1, pointers: 1 };
    }

    impl<'a> FromPointerBuilder<'a> for Builder<'a> {
        fn init_pointer(builder: PointerBuilder<'a>, _size: u32) -> Self {
            builder.init_struct(<Self as HasStructSize>::STRUCT_SIZE).into()
        }

        fn get_from_pointer(builder: PointerBuilder<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(builder.get_struct(<Self as HasStructSize>::STRUCT_SIZE, default)?.into())
        }
    }

    impl<'a> Builder<'a> {
        pub fn reborrow(&mut self) -> Builder<'_> {
            Builder { builder: self.builder.reborrow() }
        }

        pub fn into_reader(self) -> Reader<'a> {
            self.builder.into_reader().into()
        }

        #[inline]
        pub fn init_audio_frame(self) -> audio_frame::Builder<'a> {
            self.builder.set_data_field::<u16>(0, frame_tags::AUDIO_FRAME);
            FromPointerBuilder::init_pointer(self.builder.get_pointer_field(0), 0)
        }

        #[inline]
        pub fn init_video_frame(self) -> video_frame::Builder<'a> {
            self.builder.set_data_field::<u16>(0, frame_tags::VIDEO_FRAME);
            FromPointerBuilder::init_pointer(self.builder.get_pointer_field(0), 0)
        }

        /// Write a discriminant directly, as a producer built against a
        /// newer schema would. The body pointer is left untouched.
        #[inline]
        pub fn set_discriminant(&mut self, tag: u16) {
            self.builder.set_data_field::<u16>(0, tag);
        }
    }

    mod _private {
        pub const TYPE_ID: u64 = 0x9a59_9bfe_7713_2e2d;
    }
}

/// `List(Frame)`.
pub mod frame_list {
    use super::*;

    #[derive(Clone, Copy)]
    pub struct Reader<'a> {
        reader: ListReader<'a>,
    }

    impl<'a> FromPointerReader<'a> for Reader<'a> {
        fn get_from_pointer(reader: &PointerReader<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(Self { reader: reader.get_list(ElementSize::InlineComposite, default)? })
        }
    }

    impl<'a> Reader<'a> {
        pub fn len(&self) -> u32 {
            self.reader.len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Element at `index`, or `None` past the end.
        pub fn try_get(self, index: u32) -> Option<frame::Reader<'a>> {
            if index < self.len() {
                Some(self.reader.get_struct_element(index).into())
            } else {
                None
            }
        }
    }

    pub struct Builder<'a> {
        builder: ListBuilder<'a>,
    }

    impl<'a> FromPointerBuilder<'a> for Builder<'a> {
        fn init_pointer(builder: PointerBuilder<'a>, size: u32) -> Self {
            Self { builder: builder.init_struct_list(size, <frame::Builder<'_> as HasStructSize>::STRUCT_SIZE) }
        }

        fn get_from_pointer(builder: PointerBuilder<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(Self { builder: builder.get_struct_list(<frame::Builder<'_> as HasStructSize>::STRUCT_SIZE, default)? })
        }
    }

    impl<'a> Builder<'a> {
        pub fn len(&self) -> u32 {
            self.builder.len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        pub fn reborrow(&mut self) -> Builder<'_> {
            Builder { builder: self.builder.reborrow() }
        }

        /// Element at `index`. Panics past the end, like `capnp::struct_list`.
        pub fn get(self, index: u32) -> frame::Builder<'a> {
            assert!(index < self.len());
            self.builder.get_struct_element(index).into()
        }
    }
}

pub mod frames {
    use super::*;

    #[derive(Clone, Copy)]
    pub struct Reader<'a> {
        reader: StructReader<'a>,
    }

    impl<'a> From<StructReader<'a>> for Reader<'a> {
        fn from(reader: StructReader<'a>) -> Self {
            Self { reader }
        }
    }

    impl<'a> FromPointerReader<'a> for Reader<'a> {
        fn get_from_pointer(reader: &PointerReader<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(reader.get_struct(default)?.into())
        }
    }

    impl HasTypeId for Reader<'_> {
        const TYPE_ID: u64 = _private::TYPE_ID;
    }

    impl<'a> Reader<'a> {
        #[inline]
        pub fn get_frames(self) -> capnp::Result<frame_list::Reader<'a>> {
            FromPointerReader::get_from_pointer(&self.reader.get_pointer_field(0), None)
        }

        pub fn has_frames(&self) -> bool {
            !self.reader.get_pointer_field(0).is_null()
        }
    }

    pub struct Builder<'a> {
        builder: StructBuilder<'a>,
    }

    impl<'a> From<StructBuilder<'a>> for Builder<'a> {
        fn from(builder: StructBuilder<'a>) -> Self {
            Self { builder }
        }
    }

    impl HasStructSize for Builder<'_> {
        const STRUCT_SIZE: StructSize = StructSize { data: 0, pointers: 1 };
    }

    impl<'a> FromPointerBuilder<'a> for Builder<'a> {
        fn init_pointer(builder: PointerBuilder<'a>, _size: u32) -> Self {
            builder.init_struct(<Self as HasStructSize>::STRUCT_SIZE).into()
        }

        fn get_from_pointer(builder: PointerBuilder<'a>, default: Option<&'a [capnp::Word]>) -> capnp::Result<Self> {
            Ok(builder.get_struct(<Self as HasStructSize>::STRUCT_SIZE, default)?.into())
        }
    }

    impl<'a> Builder<'a> {
        pub fn reborrow(&mut self) -> Builder<'_> {
            Builder { builder: self.builder.reborrow() }
        }

        pub fn into_reader(self) -> Reader<'a> {
            self.builder.into_reader().into()
        }

        #[inline]
        pub fn init_frames(self, size: u32) -> frame_list::Builder<'a> {
            FromPointerBuilder::init_pointer(self.builder.get_pointer_field(0), size)
        }
    }

    mod _private {
        pub const TYPE_ID: u64 = 0x8983_a81a_ef33_35c6;
    }
}
