//! EXIF copyright injection
//!
//! Rewrites exactly one field of the embedded metadata block: the
//! Copyright entry of the primary (0th) image IFD. All other fields
//! are carried over untouched; a source without EXIF gets a fresh
//! block containing only the Copyright field. Pixel data is never
//! re-encoded here; the serialized block is swapped into the existing
//! byte stream.
//!
//! Only the jpeg family carries EXIF. Calling this for any other
//! format is an explicit error rather than a silent corruption of the
//! output.

use crate::format::ImageKind;
use bytes::Bytes;
use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use img_parts::jpeg::Jpeg;
use img_parts::ImageEXIF;
use photomark_core::PipelineError;
use std::io::Cursor;

/// Set the copyright field in the encoded image's metadata block,
/// returning the re-serialized byte stream.
pub fn inject_copyright(
    data: Bytes,
    kind: ImageKind,
    copyright: &str,
) -> Result<Bytes, PipelineError> {
    if !kind.supports_exif() {
        return Err(PipelineError::UnsupportedMetadataFormat {
            format: kind.name().to_string(),
        });
    }

    let mut jpeg = Jpeg::from_bytes(data)
        .map_err(|e| PipelineError::MetadataParse(format!("not a valid jpeg container: {e}")))?;

    let existing = match jpeg.exif() {
        Some(raw) => Some(
            exif::Reader::new()
                .read_raw(raw.to_vec())
                .map_err(|e| PipelineError::MetadataParse(format!("corrupt exif block: {e}")))?,
        ),
        None => None,
    };

    let copyright_field = Field {
        tag: Tag::Copyright,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![copyright.as_bytes().to_vec()]),
    };

    let mut writer = Writer::new();
    if let Some(ref parsed) = existing {
        // Overwrite, not append: any prior Copyright entry is dropped.
        for field in parsed.fields() {
            if field.tag == Tag::Copyright && field.ifd_num == In::PRIMARY {
                continue;
            }
            writer.push_field(field);
        }
    }
    writer.push_field(&copyright_field);

    let mut buf = Cursor::new(Vec::new());
    writer
        .write(&mut buf, false)
        .map_err(|e| PipelineError::MetadataParse(format!("failed to serialize exif block: {e}")))?;

    jpeg.set_exif(Some(buf.into_inner().into()));
    Ok(jpeg.encoder().bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageReader, Rgb, RgbImage};

    const COPYRIGHT: &str = "Copyright (c) 2026 Photomark Media";

    fn make_jpeg(width: u32, height: u32) -> Bytes {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([120, 80, 40])));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Jpeg)
            .unwrap();
        Bytes::from(buffer)
    }

    fn make_png(width: u32, height: u32) -> Bytes {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([120, 80, 40])));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buffer)
    }

    fn copyright_entries(data: &Bytes) -> Vec<String> {
        let jpeg = Jpeg::from_bytes(data.clone()).unwrap();
        let raw = match jpeg.exif() {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        let exif = exif::Reader::new().read_raw(raw.to_vec()).unwrap();
        exif.fields()
            .filter(|f| f.tag == Tag::Copyright && f.ifd_num == In::PRIMARY)
            .map(|f| match &f.value {
                Value::Ascii(v) => String::from_utf8_lossy(&v[0]).into_owned(),
                other => panic!("unexpected copyright value type: {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_inject_into_jpeg_without_exif() {
        let jpeg = make_jpeg(32, 32);
        let annotated = inject_copyright(jpeg, ImageKind::Jpeg, COPYRIGHT).unwrap();

        assert_eq!(copyright_entries(&annotated), vec![COPYRIGHT.to_string()]);
    }

    #[test]
    fn test_inject_is_idempotent() {
        let jpeg = make_jpeg(32, 32);
        let once = inject_copyright(jpeg, ImageKind::Jpeg, COPYRIGHT).unwrap();
        let twice = inject_copyright(once, ImageKind::Jpeg, COPYRIGHT).unwrap();

        // Overwrite, not append: exactly one entry, equal to the text.
        assert_eq!(copyright_entries(&twice), vec![COPYRIGHT.to_string()]);
    }

    #[test]
    fn test_inject_overwrites_previous_value() {
        let jpeg = make_jpeg(32, 32);
        let first = inject_copyright(jpeg, ImageKind::Jpeg, "old holder").unwrap();
        let second = inject_copyright(first, ImageKind::Jpeg, COPYRIGHT).unwrap();

        assert_eq!(copyright_entries(&second), vec![COPYRIGHT.to_string()]);
    }

    #[test]
    fn test_inject_preserves_other_fields() {
        // Seed the jpeg with an ImageDescription entry.
        let mut jpeg = Jpeg::from_bytes(make_jpeg(32, 32)).unwrap();
        let description = Field {
            tag: Tag::ImageDescription,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"beach day".to_vec()]),
        };
        let mut writer = Writer::new();
        writer.push_field(&description);
        let mut buf = Cursor::new(Vec::new());
        writer.write(&mut buf, false).unwrap();
        jpeg.set_exif(Some(buf.into_inner().into()));
        let seeded = jpeg.encoder().bytes();

        let annotated = inject_copyright(seeded, ImageKind::Jpeg, COPYRIGHT).unwrap();

        let parsed_jpeg = Jpeg::from_bytes(annotated.clone()).unwrap();
        let exif = exif::Reader::new()
            .read_raw(parsed_jpeg.exif().unwrap().to_vec())
            .unwrap();
        let description = exif
            .get_field(Tag::ImageDescription, In::PRIMARY)
            .expect("image description survives injection");
        match &description.value {
            Value::Ascii(v) => assert_eq!(v[0], b"beach day".to_vec()),
            other => panic!("unexpected value type: {:?}", other),
        }
        assert_eq!(copyright_entries(&annotated), vec![COPYRIGHT.to_string()]);
    }

    #[test]
    fn test_inject_leaves_pixel_data_untouched() {
        let jpeg = make_jpeg(32, 32);
        let annotated = inject_copyright(jpeg.clone(), ImageKind::Jpeg, COPYRIGHT).unwrap();

        let before = ImageReader::new(Cursor::new(jpeg.as_ref()))
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap()
            .to_rgb8();
        let after = ImageReader::new(Cursor::new(annotated.as_ref()))
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap()
            .to_rgb8();

        assert_eq!(before.dimensions(), after.dimensions());
        assert_eq!(before.as_raw(), after.as_raw());
    }

    #[test]
    fn test_inject_rejects_png() {
        let png = make_png(16, 16);
        assert!(matches!(
            inject_copyright(png, ImageKind::Png, COPYRIGHT),
            Err(PipelineError::UnsupportedMetadataFormat { format }) if format == "png"
        ));
    }

    #[test]
    fn test_inject_rejects_unparseable_container() {
        let garbage = Bytes::from_static(b"definitely not a jpeg");
        assert!(matches!(
            inject_copyright(garbage, ImageKind::Jpeg, COPYRIGHT),
            Err(PipelineError::MetadataParse(_))
        ));
    }
}
