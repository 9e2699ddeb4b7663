//! Graph input: TOML/JSON graph files and the interactive prompt sequence.
//!
//! A graph file looks like:
//!
//! ```toml
//! nodes = 4
//! start = 1
//! end = 4
//! edges = [[1, 2, 4], [1, 3, 1], [3, 2, 1], [2, 4, 1]]
//! ```

use anyhow::{bail, Context, Result};
use std::collections::VecDeque;
use std::io::Write;
use std::path::Path;
use stepgraph_core::{GraphError, GraphInput, NodeId, Weight, MAX_NODES};
use tokio::io::{AsyncBufRead, Lines};
use tracing::debug;

/// Read a graph file, picking the parser from the extension.
///
/// Files without a `.toml` or `.json` extension are tried as JSON first,
/// then TOML.
pub fn load_graph(path: &Path) -> Result<GraphInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    parse_graph(&content, extension.as_deref())
        .with_context(|| format!("Invalid graph file {}", path.display()))
}

pub fn parse_graph(content: &str, extension: Option<&str>) -> Result<GraphInput> {
    match extension {
        Some("toml") => Ok(toml::from_str(content)?),
        Some("json") => Ok(serde_json::from_str(content)?),
        _ => match serde_json::from_str(content) {
            Ok(input) => Ok(input),
            Err(json_err) => toml::from_str(content).map_err(|toml_err| {
                anyhow::anyhow!("not valid JSON ({}) or TOML ({})", json_err, toml_err)
            }),
        },
    }
}

/// Whitespace-separated integers pulled from a line stream, so answers may
/// span lines or share one.
struct Tokens<'a, R> {
    lines: &'a mut Lines<R>,
    pending: VecDeque<String>,
}

impl<'a, R: AsyncBufRead + Unpin> Tokens<'a, R> {
    fn new(lines: &'a mut Lines<R>) -> Self {
        Self {
            lines,
            pending: VecDeque::new(),
        }
    }

    async fn next_int(&mut self, what: &str) -> Result<i64> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return token
                    .parse()
                    .with_context(|| format!("Expected a number for {}, got '{}'", what, token));
            }
            match self.lines.next_line().await? {
                Some(line) => self
                    .pending
                    .extend(line.split_whitespace().map(String::from)),
                None => bail!("Unexpected end of input while reading {}", what),
            }
        }
    }

    /// Negative ids map to 0, which no graph contains.
    async fn next_node(&mut self, what: &str) -> Result<NodeId> {
        let value = self.next_int(what).await?;
        Ok(NodeId::try_from(value).unwrap_or(0))
    }

    async fn next_node_count(&mut self) -> Result<usize> {
        let value = self.next_int("number of nodes").await?;
        match usize::try_from(value) {
            Ok(count) if (1..=MAX_NODES).contains(&count) => Ok(count),
            Ok(count) => Err(GraphError::InvalidNodeCount { count }.into()),
            Err(_) => bail!(
                "Invalid number of nodes: {} (expected 1 to {})",
                value,
                MAX_NODES
            ),
        }
    }

    async fn next_weight(&mut self) -> Result<Weight> {
        let value = self.next_int("edge weight").await?;
        Weight::try_from(value)
            .with_context(|| format!("Edge weight must be between 0 and {}, got {}", Weight::MAX, value))
    }
}

/// A graph read from the prompts, plus whatever followed the end node on
/// its line.
#[derive(Debug)]
pub struct PromptedGraph {
    pub input: GraphInput,
    /// Tokens typed after the last answer, in order. Sessions treat them as
    /// commands.
    pub leftover: Vec<String>,
}

/// Ask for a graph on `lines`, writing prompts to `out`.
///
/// The node count is checked as soon as it is read; the remaining values
/// are validated when the graph is built.
pub async fn prompt_graph<R, W>(lines: &mut Lines<R>, out: &mut W) -> Result<PromptedGraph>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut tokens = Tokens::new(lines);

    prompt(out, &format!("Enter number of nodes (1 to {}): ", MAX_NODES))?;
    let nodes = tokens.next_node_count().await?;

    prompt(out, "Enter number of edges: ")?;
    let count = tokens.next_int("number of edges").await?.max(0);

    let mut edges = Vec::new();
    for i in 1..=count {
        prompt(
            out,
            &format!("Enter edge {} (node1 node2 weight): ", i),
        )?;
        let u = tokens.next_node("edge endpoint").await?;
        let v = tokens.next_node("edge endpoint").await?;
        let w = tokens.next_weight().await?;
        edges.push((u, v, w));
    }

    prompt(out, &format!("Enter start node (1 to {}): ", nodes))?;
    let start = tokens.next_node("start node").await?;
    prompt(out, &format!("Enter end node (1 to {}): ", nodes))?;
    let end = tokens.next_node("end node").await?;
    writeln!(out)?;

    let leftover: Vec<String> = tokens.pending.into_iter().collect();
    if !leftover.is_empty() {
        debug!("Input after the end node: {:?}", leftover);
    }

    Ok(PromptedGraph {
        input: GraphInput::new(nodes, edges, start, end),
        leftover,
    })
}

fn prompt<W: Write>(out: &mut W, text: &str) -> Result<()> {
    write!(out, "{}", text)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepgraph_core::{EdgeInput, EdgePolicy};
    use tokio::io::{AsyncBufReadExt, BufReader};

    async fn prompt_from(script: &str) -> (Result<GraphInput>, String) {
        let mut lines = BufReader::new(script.as_bytes()).lines();
        let mut out = Vec::new();
        let result = prompt_graph(&mut lines, &mut out).await;
        (result.map(|p| p.input), String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_toml_graph() {
        let content = r#"
nodes = 4
start = 1
end = 4
edges = [[1, 2, 4], [1, 3, 1], [3, 2, 1], [2, 4, 1]]
"#;
        let input = parse_graph(content, Some("toml")).unwrap();
        assert_eq!(input.nodes, 4);
        assert_eq!(input.edges.len(), 4);
        assert_eq!(input.end, 4);
    }

    #[test]
    fn test_parse_json_graph() {
        let content = r#"{"nodes": 3, "start": 1, "end": 3, "edges": [[1, 2, 1], [2, 3, 1]]}"#;
        let input = parse_graph(content, Some("json")).unwrap();
        assert_eq!(input.edges, vec![EdgeInput(1, 2, 1), EdgeInput(2, 3, 1)]);
    }

    #[test]
    fn test_parse_unknown_extension_falls_back() {
        let json = r#"{"nodes": 1, "start": 1, "end": 1}"#;
        assert_eq!(parse_graph(json, None).unwrap().nodes, 1);

        let toml = "nodes = 2\nstart = 1\nend = 2\n";
        assert_eq!(parse_graph(toml, Some("txt")).unwrap().nodes, 2);

        assert!(parse_graph("nodes: [", None).is_err());
    }

    #[test]
    fn test_load_graph_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = load_graph(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));

        let file = dir.path().join("graph.toml");
        std::fs::write(&file, "nodes = 2\nstart = 1\nend = 2\nedges = [[1, 2, 5]]\n").unwrap();
        let input = load_graph(&file).unwrap();
        let (graph, endpoints) = input.build(EdgePolicy::Drop).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(endpoints.end, 2);
    }

    #[tokio::test]
    async fn test_prompt_sequence() {
        let (result, prompts) = prompt_from("4\n4\n1 2 4\n1 3 1\n3 2 1\n2 4 1\n1\n4\n").await;
        let input = result.unwrap();

        assert_eq!(input.nodes, 4);
        assert_eq!(input.edges.len(), 4);
        assert_eq!((input.start, input.end), (1, 4));
        assert!(prompts.starts_with("Enter number of nodes (1 to 20): "));
        assert!(prompts.contains("Enter edge 4 (node1 node2 weight): "));
        assert!(prompts.contains("Enter end node (1 to 4): "));
    }

    #[tokio::test]
    async fn test_prompt_tokens_span_lines() {
        let (result, _) = prompt_from("2 1\n1\n2\n5 1 2\n").await;
        let input = result.unwrap();
        assert_eq!(input.edges, vec![EdgeInput(1, 2, 5)]);
        assert_eq!((input.start, input.end), (1, 2));
    }

    #[tokio::test]
    async fn test_prompt_rejects_node_count_early() {
        let (result, prompts) = prompt_from("25\n").await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid number of nodes: 25"));
        assert!(!prompts.contains("edges"));
    }

    #[tokio::test]
    async fn test_prompt_reports_negative_node_count() {
        let (result, prompts) = prompt_from("-5\n").await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid number of nodes: -5"));
        assert!(!prompts.contains("edges"));

        let (result, _) = prompt_from("0\n").await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid number of nodes: 0"));
    }

    #[tokio::test]
    async fn test_prompt_keeps_trailing_tokens() {
        let script = "2\n1\n1 2 5\n1\n2 j s\nq\n";
        let mut lines = BufReader::new(script.as_bytes()).lines();
        let prompted = prompt_graph(&mut lines, &mut Vec::new()).await.unwrap();
        assert_eq!(prompted.input.end, 2);
        assert_eq!(prompted.leftover, vec!["j", "s"]);

        // Later lines stay on the stream.
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("q"));

        let mut lines = BufReader::new("1\n0\n1\n1\n".as_bytes()).lines();
        let prompted = prompt_graph(&mut lines, &mut Vec::new()).await.unwrap();
        assert!(prompted.leftover.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_out_of_range_edge_is_kept_for_build() {
        let (result, _) = prompt_from("3\n1\n-1 2 3\n1\n3\n").await;
        let input = result.unwrap();
        assert_eq!(input.edges, vec![EdgeInput(0, 2, 3)]);

        let (graph, _) = input.build(EdgePolicy::Drop).unwrap();
        assert_eq!(graph.dropped_edges(), 1);
    }

    #[tokio::test]
    async fn test_prompt_errors() {
        let (result, _) = prompt_from("3\n1\n1 2 -4\n").await;
        assert!(result.unwrap_err().to_string().contains("Edge weight"));

        let (result, _) = prompt_from("3\nx\n").await;
        assert!(result.unwrap_err().to_string().contains("number of edges"));

        let (result, _) = prompt_from("3\n").await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unexpected end of input"));
    }
}
