use union_find_rs::prelude::*;

use itertools::Itertools;

use crate::graph::*;

pub trait GraphAlgorithms {
    /// Returns the connected components of the graph, each sorted by label. Components
    /// are ordered by their smallest label.
    fn components(&self) -> Vec<Vec<Label>>;
}

impl<G> GraphAlgorithms for G where G: Graph {

    #[allow(unused_must_use)]
    fn components(&self) -> Vec<Vec<Label>> {
        let mut dsets:DisjointSets<Label> = DisjointSets::new();

        for v in self.vertices() {
            // This returns a Result<()> but the potential 'error' (adding
            // an element that already exists) will not happen.
            dsets.make_set(*v);
        }

        for (u,v) in self.edges() {
            // Joining two already joined elements is harmless here.
            dsets.union(&u, &v);
        }

        let mut res:Vec<Vec<Label>> = Vec::new();
        for comp in dsets {
            res.push(comp.iter().cloned().sorted().collect())
        }
        res.sort_unstable_by_key(|comp| comp[0]);
        res
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
