pub mod error;

use crate::{
    data::{Headers, InteractionData, RequestData, ResponseData},
    error::BoxedError,
    interaction_manager::InteractionManager,
};
use error::{
    Error, MarkdownsBodyDifference, MarkdownsDifferenceLocation, MarkdownsDifferenceType,
    MarkdownsHeaderDifference,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    collections::BTreeSet,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

const CONTEXT_LENGTH: usize = 30;

lazy_static! {
    static ref HEADER_REGEX: Regex =
        Regex::new(r"(?m)(?P<header_key>[a-zA-Z0-9\-]+): (?P<header_value>.*?)$").unwrap();
    static ref MARKDOWN_REGEX: Regex = Regex::new(concat!(
        r"(?ms)",
        r"## Interaction (?P<interaction_number>[0-9]+): (?P<http_method>[A-Z]+) (?P<uri>\S+)\s*",
        r"### Request headers recorded for playback.*?",
        r"```\s*(?P<request_headers_part>.*?)\s*```.*?",
        r"### Request body recorded for playback.*?",
        r"```\s*(?P<request_body_part>.*?)\s*```.*?",
        r"### Response headers recorded for playback.*?",
        r"```\s*(?P<response_headers_part>.*?)\s*```.*?",
        r"### Response body recorded for playback \((?P<status_code>[0-9]+)[^)]*\).*?",
        r"```\s*(?P<response_body_part>.*?)\s*```",
    ))
    .unwrap();
}

/// Stores interactions in a Servirtium-style markdown file.
#[derive(Debug, Clone)]
pub struct MarkdownInteractionManager {
    markdown_path: PathBuf,
}

impl MarkdownInteractionManager {
    pub fn new<P: Into<PathBuf>>(markdown_path: P) -> Self {
        Self {
            markdown_path: markdown_path.into(),
        }
    }
}

impl InteractionManager for MarkdownInteractionManager {
    fn load_interactions(&self) -> Result<Vec<InteractionData>, BoxedError> {
        Ok(load_markdown(&self.markdown_path)?)
    }

    fn save_interactions(&self, interactions: &[InteractionData]) -> Result<(), BoxedError> {
        Ok(save_interactions(&self.markdown_path, interactions)?)
    }

    fn check_data_unchanged(&self, interactions: &[InteractionData]) -> Result<(), BoxedError> {
        Ok(check_markdown_data_unchanged(
            &self.markdown_path,
            interactions,
        )?)
    }
}

pub fn load_markdown<P: AsRef<Path>>(filename: P) -> Result<Vec<InteractionData>, Error> {
    parse_markdown(&fs::read_to_string(filename)?)
}

pub fn parse_markdown(file_contents: &str) -> Result<Vec<InteractionData>, Error> {
    let mut data = Vec::new();

    for captures in MARKDOWN_REGEX.captures_iter(file_contents) {
        let interaction_number = captures["interaction_number"]
            .parse()
            .map_err(|_| Error::InvalidInteractionNumber)?;
        let status_code = captures["status_code"]
            .parse()
            .map_err(|_| Error::InvalidStatusCode)?;

        data.push(InteractionData {
            interaction_number,
            request_data: RequestData {
                uri: captures["uri"].into(),
                method: captures["http_method"].into(),
                headers: parse_headers(&captures["request_headers_part"]),
                body: captures["request_body_part"].into(),
            },
            response_data: ResponseData {
                status_code,
                headers: parse_headers(&captures["response_headers_part"]),
                body: captures["response_body_part"].into(),
            },
        });
    }

    if data.is_empty() {
        Err(Error::InvalidMarkdownFormat)
    } else {
        Ok(data)
    }
}

fn parse_headers<T: AsRef<str>>(headers_part: T) -> Headers {
    HEADER_REGEX
        .captures_iter(headers_part.as_ref())
        .map(|capture| {
            (
                String::from(capture["header_key"].trim()),
                String::from(capture["header_value"].trim()),
            )
        })
        .collect()
}

pub fn save_interactions<'a, P: AsRef<Path>, I: IntoIterator<Item = &'a InteractionData>>(
    markdown_path: P,
    interactions: I,
) -> Result<(), Error> {
    if let Some(parent) = markdown_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = BufWriter::new(File::create(markdown_path.as_ref())?);
    write_interactions(&mut file, interactions)?;
    file.flush()?;

    Ok(())
}

pub fn write_interactions<'a, W: Write, I: IntoIterator<Item = &'a InteractionData>>(
    writer: &mut W,
    interactions: I,
) -> io::Result<()> {
    for (number, interaction) in interactions.into_iter().enumerate() {
        let request = &interaction.request_data;
        let response = &interaction.response_data;

        write!(
            writer,
            "## Interaction {}: {} {}\r\n\r\n",
            number, request.method, request.uri
        )?;

        write!(
            writer,
            "### Request headers recorded for playback:\r\n\r\n```\r\n"
        )?;
        write_headers(writer, &request.headers)?;
        write!(writer, "```\r\n\r\n")?;

        write!(
            writer,
            "### Request body recorded for playback ({}):\r\n\r\n```\r\n{}\r\n```\r\n\r\n",
            content_type(&request.headers),
            request.body,
        )?;

        write!(
            writer,
            "### Response headers recorded for playback:\r\n\r\n```\r\n"
        )?;
        write_headers(writer, &response.headers)?;
        write!(writer, "```\r\n\r\n")?;

        write!(
            writer,
            "### Response body recorded for playback ({}: {}):\r\n\r\n```\r\n{}\r\n```\r\n\r\n",
            response.status_code,
            content_type(&response.headers),
            response.body
        )?;
    }

    Ok(())
}

fn write_headers<W: Write>(writer: &mut W, headers: &Headers) -> io::Result<()> {
    for (key, value) in headers {
        write!(writer, "{}: {}\r\n", key, value)?;
    }

    Ok(())
}

fn content_type(headers: &Headers) -> &str {
    headers
        .get("content-type")
        .map(String::as_str)
        .unwrap_or_default()
}

pub fn check_markdown_data_unchanged<P: AsRef<Path>>(
    markdown_path: P,
    interactions: &[InteractionData],
) -> Result<(), Error> {
    let markdown_data = load_markdown(markdown_path)?;

    if markdown_data.len() != interactions.len() {
        return Err(Error::InteractionCountDiffers {
            old: markdown_data.len(),
            new: interactions.len(),
        });
    }

    for (interaction_number, (old, new)) in markdown_data.iter().zip(interactions).enumerate() {
        let differences = [
            (
                MarkdownsDifferenceLocation::Request,
                body_difference(&old.request_data.body, &new.request_data.body),
                header_difference(&old.request_data.headers, &new.request_data.headers),
            ),
            (
                MarkdownsDifferenceLocation::Response,
                body_difference(&old.response_data.body, &new.response_data.body),
                header_difference(&old.response_data.headers, &new.response_data.headers),
            ),
        ];

        for (location, body, header) in differences.iter().cloned() {
            let difference = body
                .map(MarkdownsDifferenceType::Body)
                .or_else(|| header.map(MarkdownsDifferenceType::Header));

            if let Some(difference) = difference {
                return Err(Error::MarkdownsDiffer {
                    interaction_number,
                    difference,
                    location,
                });
            }
        }
    }

    Ok(())
}

fn body_difference(old: &str, new: &str) -> Option<MarkdownsBodyDifference> {
    let mut old_lines = old.trim().lines();
    let mut new_lines = new.trim().lines();
    let mut line = 1;

    loop {
        match (old_lines.next(), new_lines.next()) {
            (None, None) => return None,
            (Some(o), Some(n)) if o.trim_end() == n.trim_end() => line += 1,
            (o, n) => {
                let o = o.unwrap_or_default();
                let n = n.unwrap_or_default();
                let column = o
                    .chars()
                    .zip(n.chars())
                    .take_while(|(a, b)| a == b)
                    .count();

                return Some(MarkdownsBodyDifference {
                    line,
                    column: column as u32 + 1,
                    old_context: o.chars().skip(column).take(CONTEXT_LENGTH).collect(),
                    new_context: n.chars().skip(column).take(CONTEXT_LENGTH).collect(),
                });
            }
        }
    }
}

fn header_difference(old: &Headers, new: &Headers) -> Option<MarkdownsHeaderDifference> {
    let names: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

    names.into_iter().find_map(|name| {
        let old_value = old.get(name).map(|v| v.trim());
        let new_value = new.get(name).map(|v| v.trim());

        if old_value == new_value {
            None
        } else {
            Some(MarkdownsHeaderDifference {
                header_name: name.clone(),
                old_header_value: old_value.map(String::from),
                new_header_value: new_value.map(String::from),
            })
        }
    })
}
