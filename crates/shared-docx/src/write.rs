//! Emit the owned document model as a minimal `.docx` package.

use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::DocxError;
use crate::model::{Alignment, DocxDocument, Paragraph, Run, Section, TWIPS_PER_CM};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const CP_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

/// Write the document to a new artifact at `path`.
pub fn save(doc: &DocxDocument, path: impl AsRef<Path>) -> Result<(), DocxError> {
    let path = path.as_ref();
    let save_error = |detail: String| DocxError::Save {
        path: path.to_path_buf(),
        detail,
    };

    let document_xml = render_document_xml(doc).map_err(|e| save_error(e.to_string()))?;
    let core_xml = render_core_xml(doc).map_err(|e| save_error(e.to_string()))?;

    let file = std::fs::File::create(path).map_err(|e| save_error(e.to_string()))?;
    let mut package = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    let parts: [(&str, &str); 4] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("word/document.xml", &document_xml),
        ("docProps/core.xml", &core_xml),
    ];
    for (name, content) in parts {
        package
            .start_file(name, options)
            .map_err(|e| save_error(e.to_string()))?;
        package
            .write_all(content.as_bytes())
            .map_err(|e| save_error(e.to_string()))?;
    }
    package.finish().map_err(|e| save_error(e.to_string()))?;

    tracing::debug!(path = %path.display(), "saved document");
    Ok(())
}

fn alignment_value(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

fn render_document_xml(doc: &DocxDocument) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", W_NS));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for paragraph in &doc.paragraphs {
        write_paragraph(&mut writer, paragraph)?;
    }
    // One trailing sectPr; multi-section output is not needed by the engine.
    if let Some(section) = doc.sections.first() {
        write_section(&mut writer, section)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    Ok(String::from_utf8_lossy(&writer.into_inner().into_inner()).into_owned())
}

fn write_paragraph(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    paragraph: &Paragraph,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;

    if paragraph.alignment.is_some() || paragraph.line_spacing.is_some() {
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        if let Some(alignment) = paragraph.alignment {
            let mut jc = BytesStart::new("w:jc");
            jc.push_attribute(("w:val", alignment_value(alignment)));
            writer.write_event(Event::Empty(jc))?;
        }
        if let Some(spacing) = paragraph.line_spacing {
            let mut el = BytesStart::new("w:spacing");
            let twentieths = (spacing * 240.0).round() as i64;
            el.push_attribute(("w:line", twentieths.to_string().as_str()));
            el.push_attribute(("w:lineRule", "auto"));
            writer.write_event(Event::Empty(el))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    }

    for run in &paragraph.runs {
        write_run(writer, run)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_run(writer: &mut Writer<Cursor<Vec<u8>>>, run: &Run) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;

    let has_props = run.font_name.is_some()
        || run.size_pt.is_some()
        || run.bold == Some(true)
        || run.italic == Some(true);
    if has_props {
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        if let Some(font) = &run.font_name {
            let mut fonts = BytesStart::new("w:rFonts");
            fonts.push_attribute(("w:ascii", font.as_str()));
            fonts.push_attribute(("w:hAnsi", font.as_str()));
            writer.write_event(Event::Empty(fonts))?;
        }
        if run.bold == Some(true) {
            writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
        }
        if run.italic == Some(true) {
            writer.write_event(Event::Empty(BytesStart::new("w:i")))?;
        }
        if let Some(size_pt) = run.size_pt {
            let mut sz = BytesStart::new("w:sz");
            let half_points = (size_pt * 2.0).round() as i64;
            sz.push_attribute(("w:val", half_points.to_string().as_str()));
            writer.write_event(Event::Empty(sz))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }

    let mut text = BytesStart::new("w:t");
    text.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(text))?;
    writer.write_event(Event::Text(BytesText::new(&run.text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;

    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

fn write_section(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    section: &Section,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;
    let mut margins = BytesStart::new("w:pgMar");
    let to_twips = |cm: f64| ((cm * TWIPS_PER_CM).round() as i64).to_string();
    margins.push_attribute(("w:top", to_twips(section.margins.top_cm).as_str()));
    margins.push_attribute(("w:right", to_twips(section.margins.right_cm).as_str()));
    margins.push_attribute(("w:bottom", to_twips(section.margins.bottom_cm).as_str()));
    margins.push_attribute(("w:left", to_twips(section.margins.left_cm).as_str()));
    writer.write_event(Event::Empty(margins))?;
    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
    Ok(())
}

fn render_core_xml(doc: &DocxDocument) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("cp:coreProperties");
    root.push_attribute(("xmlns:cp", CP_NS));
    root.push_attribute(("xmlns:dc", DC_NS));
    writer.write_event(Event::Start(root))?;

    for (tag, value) in [
        ("dc:title", doc.metadata.title.as_deref()),
        ("dc:creator", doc.metadata.author.as_deref()),
    ] {
        writer.write_event(Event::Start(BytesStart::new(tag)))?;
        writer.write_event(Event::Text(BytesText::new(value.unwrap_or(""))))?;
        writer.write_event(Event::End(BytesEnd::new(tag)))?;
    }

    writer.write_event(Event::End(BytesEnd::new("cp:coreProperties")))?;
    Ok(String::from_utf8_lossy(&writer.into_inner().into_inner()).into_owned())
}
