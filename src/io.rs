use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use crate::graph::{Graph, VertexId, Weight};

/// Errors raised while reading an instance file.
#[derive(Debug, Error)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: cannot read `{token}` as an integer")]
    BadToken { line: usize, token: String },

    #[error("line {line}: expected `{expected}`")]
    Malformed { line: usize, expected: &'static str },

    #[error("line {line}: weight given for unknown vertex {id}")]
    UnknownVertex { line: usize, id: VertexId },
}

/// A problem instance: the graph and, if the file names it, the number of parts.
#[derive(Debug, Clone)]
pub struct Instance {
    pub graph: Graph,
    pub partitions: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Vertices,
    Weights,
    Edges,
}

fn parse_int<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, IoError> {
    token.trim().parse().map_err(|_| IoError::BadToken { line, token: token.trim().to_string() })
}

/// Parse an instance in the `.dat` layout:
///
/// ```text
/// param p := 2;
/// set V :=
/// 1 2 3 4
/// ;
/// param w :=
/// 1 1
/// 2 2
/// ;
/// set E :=
/// (1,2) (2,3)
/// ;
/// ```
///
/// Sections end on a line containing `;`; anything before the `;` on that line still counts.
pub fn parse_instance(content: &str) -> Result<Instance, IoError> {
    let mut graph = Graph::new();
    let mut partitions = None;
    let mut section = Section::None;

    for (number, raw) in content.lines().enumerate() {
        let line = number + 1;

        if section == Section::None {
            if raw.contains("param p") {
                let value = raw
                    .split(":=")
                    .nth(1)
                    .map(|rest| rest.trim().trim_end_matches(';'))
                    .ok_or(IoError::Malformed { line, expected: "param p := <count>;" })?;
                partitions = Some(parse_int(value, line)?);
            } else if raw.contains("set V") {
                section = Section::Vertices;
            } else if raw.contains("param w") {
                section = Section::Weights;
            } else if raw.contains("set E") {
                section = Section::Edges;
            }
            continue;
        }

        let (body, closes) = match raw.find(';') {
            Some(end) => (&raw[..end], true),
            None => (raw, false),
        };

        match section {
            Section::Vertices => {
                for token in body.split_whitespace() {
                    graph.add_vertex(parse_int(token, line)?, 0);
                }
            }
            Section::Weights => {
                let tokens: Vec<&str> = body.split_whitespace().collect();
                match tokens.as_slice() {
                    [] => {}
                    [id, weight] => {
                        let id: VertexId = parse_int(id, line)?;
                        let weight: Weight = parse_int(weight, line)?;
                        if !graph.set_weight(id, weight) {
                            return Err(IoError::UnknownVertex { line, id });
                        }
                    }
                    _ => return Err(IoError::Malformed { line, expected: "<vertex> <weight>" }),
                }
            }
            Section::Edges => {
                for token in body.split_whitespace() {
                    let pair = token
                        .strip_prefix('(')
                        .and_then(|t| t.strip_suffix(')'))
                        .and_then(|t| t.split_once(','))
                        .ok_or(IoError::Malformed { line, expected: "(<u>,<v>)" })?;
                    graph.add_edge(parse_int(pair.0, line)?, parse_int(pair.1, line)?);
                }
            }
            Section::None => {}
        }

        if closes {
            section = Section::None;
        }
    }

    Ok(Instance { graph, partitions })
}

/// Read an instance file.
pub fn read_instance(file_path: &Path) -> Result<Instance, IoError> {
    let content = fs::read_to_string(file_path)?;
    parse_instance(&content)
}

/// Write the graph in DOT format, labelling every vertex with its weight.
pub fn write_dot<W: Write>(graph: &Graph, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "graph G {{")?;
    writeln!(writer)?;
    for vertex in graph.vertices() {
        writeln!(writer, "\t{}[label={} ({})];", vertex.id, vertex.id, vertex.weight)?;
    }
    writeln!(writer)?;
    for edge in (0..graph.edge_count()).map(|e| graph.edge(e)) {
        writeln!(writer, "\t{} -- {};", graph.vertex(edge.a).id, graph.vertex(edge.b).id)?;
    }
    writeln!(writer)?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write the graph in DOT format to a file.
pub fn write_dot_to_file(graph: &Graph, file_path: &Path) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(file_path)?);
    write_dot(graph, &mut writer)?;
    writer.flush()
}

/// Write the partition array to a file.
pub fn write_partition_data_to_file(graph: &Graph, partition: &[usize], file_path: &Path) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(file_path)?);
    for (vertex, part) in graph.vertices().iter().zip(partition) {
        writeln!(file, "vertex {} => partition {}", vertex.id, part)?;
    }
    file.flush()
}
