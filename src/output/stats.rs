//! Statistics reporting.

use console::style;

use crate::sync::SyncStats;

/// Print statistics for a finished run.
pub fn print_sync_stats(stats: &SyncStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Archive Statistics:").bold());
    println!("  Pages:    {}", stats.pages);
    println!("  Posts:    {}", stats.posts);
    println!("  Comments: {}", stats.comments);
    println!("  Users:    {}", stats.users);
    println!("  Pictures: {}", style(stats.pic_count).green());
    println!("  Videos:   {}", style(stats.vid_count).green());
    println!("  Audio:    {}", style(stats.audio_count).green());
    if stats.other_count > 0 {
        println!("  Other:    {}", stats.other_count);
    }
    println!("  Total:    {} downloaded", stats.media_written());
    println!("{}", style("═".repeat(50)).dim());
}
