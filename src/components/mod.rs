pub mod concept_graph;
