// src/render/docx.rs
//! DOCX packing: WordprocessingML parts zipped into an OPC container

use std::io::{self, Cursor, Write};

use anyhow::{Context, Result};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::render::doctree::{
    render_doctree, DocBlock, DocHeading, DocParagraph, DocRun, DocTree, HeadingLevel, NamedStyle,
};
use crate::types::CareerProfile;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Letter page with 1" margins leaves 9360 twips of text width; the right
/// tab stop sits at that edge.
const RIGHT_TAB_POS: u32 = 9360;

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn spacing_xml(before: Option<u32>, after: Option<u32>) -> String {
    if before.is_none() && after.is_none() {
        return String::new();
    }
    let mut xml = String::from("<w:spacing");
    if let Some(before) = before {
        xml.push_str(&format!(" w:before=\"{}\"", before));
    }
    if let Some(after) = after {
        xml.push_str(&format!(" w:after=\"{}\"", after));
    }
    xml.push_str("/>");
    xml
}

fn heading_xml(heading: &DocHeading) -> String {
    let style = match heading.level {
        HeadingLevel::H1 => "Heading1",
        HeadingLevel::H2 => "Heading2",
    };
    let mut ppr = format!("<w:pStyle w:val=\"{}\"/>", style);
    if heading.bottom_border {
        ppr.push_str(
            "<w:pBdr><w:bottom w:val=\"single\" w:sz=\"6\" w:space=\"1\" w:color=\"auto\"/></w:pBdr>",
        );
    }
    ppr.push_str(&spacing_xml(heading.spacing_before, heading.spacing_after));
    format!(
        "<w:p><w:pPr>{}</w:pPr><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        ppr,
        xml_escape(&heading.text)
    )
}

fn run_xml(run: &DocRun) -> String {
    let mut rpr = String::new();
    if run.bold {
        rpr.push_str("<w:b/>");
    }
    if run.italic {
        rpr.push_str("<w:i/>");
    }
    if let Some(color) = &run.color {
        rpr.push_str(&format!("<w:color w:val=\"{}\"/>", color));
    }
    if let Some(size) = run.size_half_points {
        rpr.push_str(&format!(
            "<w:sz w:val=\"{0}\"/><w:szCs w:val=\"{0}\"/>",
            size
        ));
    }

    let mut xml = String::from("<w:r>");
    if !rpr.is_empty() {
        xml.push_str(&format!("<w:rPr>{}</w:rPr>", rpr));
    }
    if run.break_before {
        xml.push_str("<w:br/>");
    }
    if run.tab_before {
        xml.push_str("<w:tab/>");
    }
    xml.push_str(&format!(
        "<w:t xml:space=\"preserve\">{}</w:t></w:r>",
        xml_escape(&run.text)
    ));
    xml
}

fn paragraph_xml(para: &DocParagraph) -> String {
    let mut ppr = String::new();
    if para.bullet {
        ppr.push_str("<w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"1\"/></w:numPr>");
    }
    if para.right_tab_stop {
        ppr.push_str(&format!(
            "<w:tabs><w:tab w:val=\"right\" w:pos=\"{}\"/></w:tabs>",
            RIGHT_TAB_POS
        ));
    }
    ppr.push_str(&spacing_xml(para.spacing_before, para.spacing_after));
    if para.centered {
        ppr.push_str("<w:jc w:val=\"center\"/>");
    }

    let mut xml = String::from("<w:p>");
    if !ppr.is_empty() {
        xml.push_str(&format!("<w:pPr>{}</w:pPr>", ppr));
    }
    for run in &para.runs {
        xml.push_str(&run_xml(run));
    }
    xml.push_str("</w:p>");
    xml
}

fn document_xml(tree: &DocTree) -> String {
    let mut body = String::new();
    for block in &tree.blocks {
        match block {
            DocBlock::Heading(heading) => body.push_str(&heading_xml(heading)),
            DocBlock::Paragraph(para) => body.push_str(&paragraph_xml(para)),
        }
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <w:document xmlns:w=\"{}\"><w:body>{}\
         <w:sectPr><w:pgSz w:w=\"12240\" w:h=\"15840\"/>\
         <w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\"/>\
         </w:sectPr></w:body></w:document>",
        WORD_NS, body
    )
}

fn style_xml(style: &NamedStyle) -> String {
    let mut spacing = String::new();
    if style.line_spacing.is_some() || style.spacing_after.is_some() {
        spacing.push_str("<w:spacing");
        if let Some(after) = style.spacing_after {
            spacing.push_str(&format!(" w:after=\"{}\"", after));
        }
        if let Some(line) = style.line_spacing {
            spacing.push_str(&format!(" w:line=\"{}\" w:lineRule=\"auto\"", line));
        }
        spacing.push_str("/>");
    }
    let mut ppr = spacing;
    if style.centered {
        ppr.push_str("<w:jc w:val=\"center\"/>");
    }

    let font = xml_escape(&style.font);
    let mut rpr = format!("<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\"/>", font);
    if style.bold {
        rpr.push_str("<w:b/>");
    }
    if style.all_caps {
        rpr.push_str("<w:caps/>");
    }
    rpr.push_str(&format!(
        "<w:sz w:val=\"{0}\"/><w:szCs w:val=\"{0}\"/>",
        style.size_half_points
    ));

    let mut xml = format!(
        "<w:style w:type=\"paragraph\" w:styleId=\"{}\"><w:name w:val=\"{}\"/>",
        xml_escape(&style.id),
        xml_escape(&style.name)
    );
    if !ppr.is_empty() {
        xml.push_str(&format!("<w:pPr>{}</w:pPr>", ppr));
    }
    xml.push_str(&format!("<w:rPr>{}</w:rPr></w:style>", rpr));
    xml
}

fn styles_xml(styles: &[NamedStyle]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <w:styles xmlns:w=\"{}\">\
         <w:docDefaults><w:rPrDefault><w:rPr>\
         <w:rFonts w:ascii=\"Calibri\" w:hAnsi=\"Calibri\"/>\
         <w:sz w:val=\"22\"/><w:szCs w:val=\"22\"/>\
         </w:rPr></w:rPrDefault></w:docDefaults>",
        WORD_NS
    );
    for style in styles {
        xml.push_str(&style_xml(style));
    }
    xml.push_str("</w:styles>");
    xml
}

fn numbering_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <w:numbering xmlns:w=\"{}\">\
         <w:abstractNum w:abstractNumId=\"0\">\
         <w:lvl w:ilvl=\"0\"><w:start w:val=\"1\"/><w:numFmt w:val=\"bullet\"/>\
         <w:lvlText w:val=\"\u{2022}\"/><w:lvlJc w:val=\"left\"/>\
         <w:pPr><w:ind w:left=\"360\" w:hanging=\"180\"/></w:pPr>\
         </w:lvl></w:abstractNum>\
         <w:num w:numId=\"1\"><w:abstractNumId w:val=\"0\"/></w:num>\
         </w:numbering>",
        WORD_NS
    )
}

fn content_types_xml() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
     <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
     <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
     <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
     <Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
     <Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>\
     <Override PartName=\"/word/numbering.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml\"/>\
     </Types>"
        .to_string()
}

fn package_rels_xml() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
     </Relationships>"
        .to_string()
}

fn document_rels_xml() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>\
     <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering\" Target=\"numbering.xml\"/>\
     </Relationships>"
        .to_string()
}

fn write_part<W: Write + io::Seek>(
    zip: &mut ZipWriter<W>,
    path: &str,
    content: &str,
    options: FileOptions,
) -> Result<()> {
    zip.start_file(path, options)
        .with_context(|| format!("Failed to start DOCX part {}", path))?;
    zip.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write DOCX part {}", path))?;
    Ok(())
}

/// Packs a document tree into DOCX bytes.
pub fn pack_docx(tree: &DocTree) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    write_part(&mut zip, "[Content_Types].xml", &content_types_xml(), options)?;
    write_part(&mut zip, "_rels/.rels", &package_rels_xml(), options)?;
    write_part(
        &mut zip,
        "word/_rels/document.xml.rels",
        &document_rels_xml(),
        options,
    )?;
    write_part(&mut zip, "word/styles.xml", &styles_xml(&tree.styles), options)?;
    write_part(&mut zip, "word/numbering.xml", &numbering_xml(), options)?;
    write_part(&mut zip, "word/document.xml", &document_xml(tree), options)?;

    let cursor = zip.finish().context("Failed to finalize DOCX container")?;
    Ok(cursor.into_inner())
}

/// Renders the profile straight to DOCX bytes.
pub fn render_docx(profile: &CareerProfile) -> Result<Vec<u8>> {
    pack_docx(&render_doctree(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn document_part(bytes: Vec<u8>) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut doc = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut doc)
            .unwrap();
        doc
    }

    #[test]
    fn test_container_has_all_parts() {
        let bytes = render_docx(&CareerProfile::starter()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/numbering.xml",
            "word/document.xml",
        ] {
            assert!(archive.by_name(part).is_ok(), "missing part {}", part);
        }
    }

    #[test]
    fn test_document_part_carries_name_tabs_and_bullets() {
        let doc = document_part(render_docx(&CareerProfile::starter()).unwrap());
        assert!(doc.contains("Alex Sterling"));
        assert!(doc.contains("<w:tab w:val=\"right\" w:pos=\"9360\"/>"));
        assert!(doc.contains("<w:numId w:val=\"1\"/>"));
        assert!(doc.contains("2021 \u{2013} Present"));
    }

    #[test]
    fn test_text_is_xml_escaped() {
        let mut profile = CareerProfile::starter();
        profile.basics.name = "R&D <Lead>".to_string();
        let doc = document_part(render_docx(&profile).unwrap());
        assert!(doc.contains("R&amp;D &lt;Lead&gt;"));
        assert!(!doc.contains("<Lead>"));
    }

    #[test]
    fn test_suppressed_section_has_no_heading_in_the_part() {
        let mut profile = CareerProfile::starter();
        profile.experience.clear();
        let doc = document_part(render_docx(&profile).unwrap());
        assert!(!doc.contains(">Experience<"));
        assert!(doc.contains(">Skills<"));
    }

    #[test]
    fn test_styles_part_defines_the_heading_look() {
        let bytes = render_docx(&CareerProfile::starter()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut styles = String::new();
        archive
            .by_name("word/styles.xml")
            .unwrap()
            .read_to_string(&mut styles)
            .unwrap();
        assert!(styles.contains("w:styleId=\"Heading2\""));
        assert!(styles.contains("<w:caps/>"));
        assert!(styles.contains("w:ascii=\"Calibri\""));
    }
}
