//! Property tests for the room graph, the grid pathfinder, and generation.

use delve::{
    next_step_toward, validate_floor, Floor, GenerationConfig, Graph, Position, UNREACHABLE,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn build_graph(vertices: u8, edges: &[(u8, u8, u32)]) -> Graph<u8> {
    let mut graph = Graph::new();
    for vertex in 0..vertices {
        graph.add_vertex(vertex);
    }
    for &(a, b, weight) in edges {
        graph.add_bidirectional_edge(a % vertices, b % vertices, weight);
    }
    graph
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn bfs_and_dfs_reach_the_same_vertices(
        vertices in 1_u8..16,
        edges in prop::collection::vec((any::<u8>(), any::<u8>(), 1_u32..20), 0..40),
        start in any::<u8>(),
    ) {
        let graph = build_graph(vertices, &edges);
        let start = start % vertices;

        let breadth: HashSet<u8> = graph.bfs(&start).into_iter().collect();
        let depth: HashSet<u8> = graph.dfs(&start).into_iter().collect();
        prop_assert_eq!(&breadth, &depth);
        prop_assert_eq!(graph.bfs(&start).len(), breadth.len());

        let distances = graph.dijkstra(&start);
        for vertex in 0..vertices {
            let reachable = distances[&vertex] != UNREACHABLE;
            prop_assert_eq!(reachable, breadth.contains(&vertex));
        }
    }

    #[test]
    fn dijkstra_distances_are_consistent(
        vertices in 1_u8..16,
        edges in prop::collection::vec((any::<u8>(), any::<u8>(), 1_u32..20), 0..40),
        target in any::<u8>(),
    ) {
        let graph = build_graph(vertices, &edges);
        let distances = graph.dijkstra(&0);
        prop_assert_eq!(distances[&0], 0);

        for vertex in 0..vertices {
            let from = distances[&vertex];
            if from == UNREACHABLE {
                continue;
            }
            for edge in graph.edges(&vertex) {
                prop_assert!(distances[&edge.to] <= from + edge.weight);
            }
        }

        let target = target % vertices;
        match graph.shortest_path(&0, &target) {
            None => prop_assert_eq!(distances[&target], UNREACHABLE),
            Some(path) => {
                prop_assert_eq!(path.first(), Some(&0));
                prop_assert_eq!(path.last(), Some(&target));
                let cost: u32 = path
                    .windows(2)
                    .map(|step| {
                        graph
                            .edges(&step[0])
                            .iter()
                            .filter(|edge| edge.to == step[1])
                            .map(|edge| edge.weight)
                            .min()
                            .unwrap_or(UNREACHABLE)
                    })
                    .sum();
                prop_assert_eq!(cost, distances[&target]);
            }
        }
    }

    #[test]
    fn pathfinder_only_steps_onto_walkable_cells(
        walls in prop::collection::vec(any::<bool>(), 64),
        from in (0_i32..8, 0_i32..8),
        target in (0_i32..8, 0_i32..8),
    ) {
        let walkable = |pos: Position| {
            (0..8).contains(&pos.x)
                && (0..8).contains(&pos.y)
                && !walls[(pos.y * 8 + pos.x) as usize]
        };
        let from = Position::new(from.0, from.1);
        let target = Position::new(target.0, target.1);

        let next = next_step_toward(from, target, walkable);
        prop_assert!(next == from || (walkable(next) && from.manhattan_distance(next) == 1));
    }

    #[test]
    fn generated_floors_pass_validation(seed in any::<u64>(), rooms in 0_usize..14) {
        let config = GenerationConfig::new(seed);
        let mut floor = Floor::new(&config);
        prop_assert!(floor.generate(rooms, &mut config.create_rng()).is_ok());
        prop_assert!(validate_floor(&floor).is_ok(), "seed={seed}, rooms={rooms}");
        prop_assert_eq!(floor.rooms().len(), rooms);
        if let Some(start) = floor.start_room_id() {
            prop_assert_eq!(floor.reachable_rooms(start).len(), rooms);
        }
    }
}
