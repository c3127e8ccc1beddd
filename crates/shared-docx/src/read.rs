//! Load a `.docx` package into the owned document model.

use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::DocxError;
use crate::model::{
    Alignment, DocMetadata, DocxDocument, Margins, Paragraph, Run, Section, TWIPS_PER_CM,
};

/// Load a document from durable storage.
///
/// A missing or unparsable `word/document.xml` is fatal; a missing
/// `docProps/core.xml` degrades to empty metadata.
pub fn load(path: impl AsRef<Path>) -> Result<DocxDocument, DocxError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| DocxError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| DocxError::Package(e.to_string()))?;

    let document_xml = read_part(&mut archive, "word/document.xml")?
        .ok_or_else(|| DocxError::Package("missing word/document.xml".to_string()))?;
    let core_xml = read_part(&mut archive, "docProps/core.xml")?;

    let mut doc = parse_document_xml(&document_xml)?;
    if let Some(core) = core_xml {
        doc.metadata = parse_core_xml(&core)?;
    }

    tracing::debug!(
        path = %path.display(),
        paragraphs = doc.paragraphs.len(),
        sections = doc.sections.len(),
        tables = doc.table_count,
        "loaded document"
    );
    Ok(doc)
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, DocxError> {
    match archive.by_name(name) {
        Ok(mut entry) => {
            let mut xml = String::new();
            entry
                .read_to_string(&mut xml)
                .map_err(|e| DocxError::Parse {
                    part: name.to_string(),
                    detail: e.to_string(),
                })?;
            Ok(Some(xml))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(DocxError::Package(e.to_string())),
    }
}

fn parse_error(detail: impl ToString) -> DocxError {
    DocxError::Parse {
        part: "word/document.xml".to_string(),
        detail: detail.to_string(),
    }
}

fn attr_value(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// `w:b`/`w:i` toggles: absent value means on.
fn on_off(element: &BytesStart<'_>) -> bool {
    match attr_value(element, b"w:val") {
        None => true,
        Some(v) => !matches!(v.as_str(), "0" | "false" | "none" | "off"),
    }
}

fn parse_alignment(value: &str) -> Option<Alignment> {
    match value {
        "center" => Some(Alignment::Center),
        "right" | "end" => Some(Alignment::Right),
        "both" | "justify" | "distribute" => Some(Alignment::Justify),
        "left" | "start" => Some(Alignment::Left),
        _ => None,
    }
}

fn parse_document_xml(xml: &str) -> Result<DocxDocument, DocxError> {
    let mut reader = Reader::from_str(xml);

    let mut doc = DocxDocument::default();
    let mut current_paragraph: Option<Paragraph> = None;
    let mut current_run: Option<Run> = None;
    let mut in_text = false;
    // Paragraphs inside table cells belong to the table, not the body flow.
    let mut table_depth = 0usize;

    loop {
        let event = reader.read_event().map_err(parse_error)?;
        match &event {
            Event::Eof => break,
            Event::Start(e) | Event::Empty(e) => {
                let name = e.name().as_ref().to_vec();
                match name.as_slice() {
                    b"w:tbl" => {
                        if table_depth == 0 {
                            doc.table_count += 1;
                        }
                        table_depth += 1;
                    }
                    b"w:p" if table_depth == 0 => {
                        current_paragraph = Some(Paragraph::default());
                    }
                    b"w:r" if table_depth == 0 && current_paragraph.is_some() => {
                        current_run = Some(Run::default());
                    }
                    b"w:t" => in_text = true,
                    b"w:jc" => {
                        if current_run.is_none() {
                            if let (Some(para), Some(value)) =
                                (current_paragraph.as_mut(), attr_value(e, b"w:val"))
                            {
                                para.alignment = parse_alignment(&value);
                            }
                        }
                    }
                    b"w:spacing" => {
                        // Paragraph spacing only; rPr character spacing is skipped.
                        if current_run.is_none() {
                            if let (Some(para), Some(line)) =
                                (current_paragraph.as_mut(), attr_value(e, b"w:line"))
                            {
                                if let Ok(twentieths) = line.parse::<f64>() {
                                    para.line_spacing = Some(twentieths / 240.0);
                                }
                            }
                        }
                    }
                    b"w:rFonts" => {
                        if let Some(run) = current_run.as_mut() {
                            run.font_name =
                                attr_value(e, b"w:ascii").or_else(|| attr_value(e, b"w:hAnsi"));
                        }
                    }
                    b"w:sz" => {
                        if let Some(run) = current_run.as_mut() {
                            if let Some(half_points) = attr_value(e, b"w:val") {
                                if let Ok(hp) = half_points.parse::<f64>() {
                                    run.size_pt = Some(hp / 2.0);
                                }
                            }
                        }
                    }
                    b"w:b" => {
                        if let Some(run) = current_run.as_mut() {
                            run.bold = Some(on_off(e));
                        }
                    }
                    b"w:i" => {
                        if let Some(run) = current_run.as_mut() {
                            run.italic = Some(on_off(e));
                        }
                    }
                    b"w:pgMar" => {
                        doc.sections.push(Section {
                            margins: parse_margins(e),
                        });
                    }
                    _ => {}
                }
                // Self-closing elements never produce an End event.
                if matches!(event, Event::Empty(_)) {
                    match name.as_slice() {
                        b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                        b"w:p" if table_depth == 0 => {
                            if let Some(para) = current_paragraph.take() {
                                doc.paragraphs.push(para);
                            }
                        }
                        b"w:t" => in_text = false,
                        _ => {}
                    }
                }
            }
            Event::Text(t) => {
                if in_text {
                    if let Some(run) = current_run.as_mut() {
                        let text = t.unescape().map_err(parse_error)?;
                        run.text.push_str(&text);
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:p" if table_depth == 0 => {
                    if let Some(para) = current_paragraph.take() {
                        doc.paragraphs.push(para);
                    }
                }
                b"w:r" if table_depth == 0 => {
                    if let (Some(para), Some(run)) =
                        (current_paragraph.as_mut(), current_run.take())
                    {
                        para.runs.push(run);
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            _ => {}
        }
    }

    if doc.sections.is_empty() {
        doc.sections.push(Section::default());
    }
    Ok(doc)
}

fn parse_margins(element: &BytesStart<'_>) -> Margins {
    let side = |key: &[u8], fallback: f64| -> f64 {
        attr_value(element, key)
            .and_then(|v| v.parse::<f64>().ok())
            .map(|twips| twips / TWIPS_PER_CM)
            .unwrap_or(fallback)
    };
    let defaults = Margins::default();
    Margins {
        top_cm: side(b"w:top", defaults.top_cm),
        bottom_cm: side(b"w:bottom", defaults.bottom_cm),
        left_cm: side(b"w:left", defaults.left_cm),
        right_cm: side(b"w:right", defaults.right_cm),
    }
}

fn parse_core_xml(xml: &str) -> Result<DocMetadata, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut metadata = DocMetadata::default();
    let mut capture: Option<&'static str> = None;

    loop {
        match reader.read_event().map_err(|e| DocxError::Parse {
            part: "docProps/core.xml".to_string(),
            detail: e.to_string(),
        })? {
            Event::Eof => break,
            Event::Start(e) => {
                capture = match e.name().as_ref() {
                    b"dc:title" => Some("title"),
                    b"dc:creator" => Some("creator"),
                    _ => None,
                };
            }
            Event::Text(t) => {
                if let Some(field) = capture {
                    let value = t
                        .unescape()
                        .map_err(|e| DocxError::Parse {
                            part: "docProps/core.xml".to_string(),
                            detail: e.to_string(),
                        })?
                        .into_owned();
                    if !value.is_empty() {
                        match field {
                            "title" => metadata.title = Some(value),
                            _ => metadata.author = Some(value),
                        }
                    }
                }
            }
            Event::End(_) => capture = None,
            _ => {}
        }
    }
    Ok(metadata)
}
